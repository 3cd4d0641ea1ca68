use crate::generate::{self, Options, Summary};
use crate::render::{JinjaRenderer, Renderer};
use crate::util::dump_autoloads;
use crate::writer::{ConfirmingWriter, FileWriter};
use anyhow::Result;
use clap::{Args, Parser};
use colored::Colorize;
use scaffold_core::config::{get_var_base_path, Config};
use scaffold_core::ResourceDescriptor;
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Positional arguments shared by every command that builds a resource descriptor.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// The name of the resource
    pub name: String,

    /// The plural name of the resource, used verbatim for the table and routes
    pub plural: String,

    /// The fields that the resource should have, as `name:type[:modifier]*`
    #[arg(required = true)]
    pub fields: Vec<String>,

    /// Implement soft deletes for the resource
    #[clap(long)]
    pub soft_deletes: bool,
}

impl ResourceArgs {
    pub fn descriptor(&self) -> scaffold_core::Result<ResourceDescriptor> {
        ResourceDescriptor::from_definitions(&self.name, &self.plural, &self.fields, self.soft_deletes)
    }
}

/// Generate a resource: migration, factory, test, model, resources, controller and routes.
#[derive(Parser, Debug)]
pub struct Resource {
    #[command(flatten)]
    args: ResourceArgs,

    /// Overwrite existing files without asking
    #[clap(long, short)]
    force: bool,

    /// The base controller's `validate` returns the validated attributes
    #[clap(long)]
    no_inline_validation: bool,

    /// The base controller provides `keysToSnakeCase`
    #[clap(long)]
    no_inline_snake_case: bool,

    /// Don't refresh the autoloader after writing files
    #[clap(long)]
    skip_autoload: bool,

    /// Project root. Defaults to $SCAFFOLD_BASE_PATH, then the current directory.
    #[clap(long)]
    base_path: Option<PathBuf>,
}

/// Local time, falling back to UTC where the local offset can't be determined safely.
fn migration_timestamp() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|e| {
        debug!(error = %e, "local offset unavailable, stamping migration in UTC");
        OffsetDateTime::now_utc()
    })
}

impl Resource {
    pub fn run(self) -> Result<()> {
        let config = crate::config::load_config()?;
        let renderer = JinjaRenderer::new()?;
        let stdin = io::stdin();
        let mut writer = ConfirmingWriter::new(stdin.lock(), io::stderr(), self.force);
        self.execute(config, &renderer, &mut writer, migration_timestamp())?;
        Ok(())
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        config.inline_validation &= !self.no_inline_validation;
        config.inline_snake_case &= !self.no_inline_snake_case;
        config.dump_autoload &= !self.skip_autoload;
        config
    }

    fn execute(
        &self,
        config: Config,
        renderer: &dyn Renderer,
        writer: &mut dyn FileWriter,
        timestamp: OffsetDateTime,
    ) -> Result<Summary> {
        let config = self.apply_overrides(config);
        // Fails on the first malformed token, before anything is rendered or written.
        let descriptor = self.args.descriptor()?;
        let base = self.base_path.clone().unwrap_or_else(get_var_base_path);

        let options = Options {
            inline_validate: config.inline_validation,
            inline_snake_case: config.inline_snake_case,
            timestamp,
        };
        let artifacts = generate::plan(&descriptor, renderer, &options)?;
        let summary = generate::write_all(&base, &artifacts, writer)?;

        if config.dump_autoload {
            refresh_autoload(&config, &base);
        }
        Ok(summary)
    }
}

fn refresh_autoload(config: &Config, base: &Path) {
    if let Err(e) = dump_autoloads(config, base) {
        warn!(error = %e, "autoload refresh failed");
        eprintln!("{} Could not refresh autoload: {e:#}", "WARNING".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use std::io::Cursor;
    use time::macros::datetime;

    fn parse(args: &[&str], base: &Path) -> Resource {
        let base = base.to_string_lossy().to_string();
        let mut argv = vec!["resource", "--skip-autoload", "--base-path", base.as_str()];
        argv.extend_from_slice(args);
        Resource::try_parse_from(argv).unwrap()
    }

    fn execute(cmd: &Resource) -> Result<Summary> {
        let mut writer = ConfirmingWriter::new(Cursor::new(Vec::new()), Vec::new(), cmd.force);
        cmd.execute(
            Config::default(),
            &JinjaRenderer::new().unwrap(),
            &mut writer,
            datetime!(2024-01-02 03:04:05 UTC),
        )
    }

    #[test]
    fn test_migration_timestamp_is_current() {
        let before = OffsetDateTime::now_utc().unix_timestamp();
        let stamp = migration_timestamp();
        let after = OffsetDateTime::now_utc().unix_timestamp();
        assert!((before..=after).contains(&stamp.unix_timestamp()));
    }

    #[test]
    fn test_generates_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = parse(&["post", "posts", "id:integer:primary:increments", "name:string", "--soft-deletes"], dir.path());
        let summary = execute(&cmd).unwrap();
        assert_eq!(summary.created.len(), 7);
        assert_eq!(summary.appended.len(), 1);

        let migration =
            fs::read_to_string(dir.path().join("database/migrations/2024_01_02_030405_create_posts.php")).unwrap();
        assert!(migration.contains("$table->increments('id');"));
        assert!(migration.contains("$table->softDeletesTz();"));
        let model = fs::read_to_string(dir.path().join("app/Post.php")).unwrap();
        assert!(model.contains("use SoftDeletes;"));
    }

    #[test]
    fn test_malformed_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = parse(&["article", "articles", "id:uuid:primary", "title"], dir.path());
        let err = execute(&cmd).unwrap_err();
        assert_matches!(
            err.downcast_ref::<scaffold_core::Error>(),
            Some(scaffold_core::Error::MalformedFieldDefinition { definition, .. }) if definition == "title"
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = parse(&["", "articles", "title:string"], dir.path());
        let err = execute(&cmd).unwrap_err();
        assert_matches!(err.downcast_ref::<scaffold_core::Error>(), Some(scaffold_core::Error::EmptyResourceName));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_fields_are_required() {
        assert!(Resource::try_parse_from(["resource", "article", "articles"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = parse(&["article", "articles", "title:string", "--no-inline-validation"], dir.path());
        let config = cmd.apply_overrides(Config::default());
        assert!(!config.inline_validation);
        assert!(config.inline_snake_case);
        assert!(!config.dump_autoload);
    }

    #[test]
    fn test_controller_respects_config() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = parse(&["article", "articles", "title:string", "--no-inline-snake-case"], dir.path());
        execute(&cmd).unwrap();
        let controller = fs::read_to_string(dir.path().join("app/Http/Controllers/ArticleController.php")).unwrap();
        assert!(controller.contains("$this->keysToSnakeCase($attributes)"));
        assert!(!controller.contains("private function keysToSnakeCase"));
    }
}
