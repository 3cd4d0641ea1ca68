use crate::render::{params, Renderer, TemplateId};
use crate::writer::FileWriter;
use anyhow::{Context, Result};
use colored::Colorize;
use scaffold_core::ResourceDescriptor;
use serde_json::Value;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

const ROUTES_FILE: [&str; 2] = ["routes", "web.php"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file, asking before replacing an existing one.
    Create,
    Append,
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub template: TemplateId,
    /// Relative to the project base path.
    pub path: PathBuf,
    pub contents: String,
    pub mode: WriteMode,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub inline_validate: bool,
    pub inline_snake_case: bool,
    /// Prefix of the migration file name.
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub appended: Vec<PathBuf>,
}

fn relative_path(segments: &[&str]) -> PathBuf {
    segments.iter().collect()
}

pub fn artifact_path(id: TemplateId, descriptor: &ResourceDescriptor, timestamp: OffsetDateTime) -> Result<PathBuf> {
    let pascal = descriptor.pascal_name();
    let path = match id {
        TemplateId::Migration => {
            let stamp = timestamp.format(format_description!("[year]_[month]_[day]_[hour][minute][second]"))?;
            let file_name = format!("{stamp}_create_{}.php", descriptor.plural_name());
            relative_path(&["database", "migrations", file_name.as_str()])
        }
        TemplateId::Factory => relative_path(&["database", "factories", format!("{pascal}Factory.php").as_str()]),
        TemplateId::Test => relative_path(&["tests", format!("{pascal}Test.php").as_str()]),
        TemplateId::Model => relative_path(&["app", format!("{pascal}.php").as_str()]),
        TemplateId::Resource => relative_path(&["app", "Resources", format!("{pascal}.php").as_str()]),
        TemplateId::ResourceCollection => relative_path(&["app", "Resources", format!("{pascal}Collection.php").as_str()]),
        TemplateId::Controller => {
            relative_path(&["app", "Http", "Controllers", format!("{pascal}Controller.php").as_str()])
        }
        TemplateId::Routes => relative_path(&ROUTES_FILE),
    };
    Ok(path)
}

/// Renders every artifact up front. Nothing touches the file system here, so a template
/// failure leaves the project exactly as it was.
pub fn plan(descriptor: &ResourceDescriptor, renderer: &dyn Renderer, options: &Options) -> Result<Vec<Artifact>> {
    let base = params(descriptor)?;
    TemplateId::ALL
        .into_iter()
        .map(|id| -> Result<Artifact> {
            let mut params = base.clone();
            if id == TemplateId::Controller {
                params.insert("inlineValidate".to_string(), Value::Bool(options.inline_validate));
                params.insert("inlineSnakeCase".to_string(), Value::Bool(options.inline_snake_case));
            }
            let text = renderer.render(id, &params)?;
            debug!(template = %id, bytes = text.len(), "rendered artifact");
            let (contents, mode) = match id {
                TemplateId::Routes => (format!("\n{text}\n"), WriteMode::Append),
                _ => (format!("<?php\n\n{text}\n"), WriteMode::Create),
            };
            Ok(Artifact {
                template: id,
                path: artifact_path(id, descriptor, options.timestamp)?,
                contents,
                mode,
            })
        })
        .collect()
}

/// Declined overwrites are recorded in the summary and do not stop the remaining artifacts.
pub fn write_all(base: &Path, artifacts: &[Artifact], writer: &mut dyn FileWriter) -> Result<Summary> {
    let mut summary = Summary::default();
    for artifact in artifacts {
        let dest = base.join(&artifact.path);
        match artifact.mode {
            WriteMode::Create => {
                let written = writer
                    .write_if_confirmed(&dest, &artifact.contents)
                    .with_context(|| format!("Failed to write {}", artifact.template))?;
                if written {
                    eprintln!("{} {}", "Created:".green(), dest.display());
                    summary.created.push(dest);
                } else {
                    eprintln!("{} {}", "Skipped:".yellow(), dest.display());
                    summary.skipped.push(dest);
                }
            }
            WriteMode::Append => {
                writer
                    .append(&dest, &artifact.contents)
                    .with_context(|| format!("Failed to append {}", artifact.template))?;
                eprintln!("{} {}", "Appended:".green(), dest.display());
                summary.appended.push(dest);
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{JinjaRenderer, Params};
    use crate::writer::ConfirmingWriter;
    use std::cell::RefCell;
    use std::fs;
    use std::io::Cursor;
    use time::macros::datetime;

    fn options() -> Options {
        Options {
            inline_validate: true,
            inline_snake_case: false,
            timestamp: datetime!(2017-09-16 10:03:50 UTC),
        }
    }

    fn article() -> ResourceDescriptor {
        ResourceDescriptor::from_definitions(
            "article",
            "articles",
            ["id:uuid:primary", "title:string", "published:boolean"],
            false,
        )
        .unwrap()
    }

    /// Records the parameters of each call and echoes the template name.
    #[derive(Default)]
    struct EchoRenderer {
        calls: RefCell<Vec<(TemplateId, Params)>>,
    }

    impl Renderer for EchoRenderer {
        fn render(&self, id: TemplateId, params: &Params) -> Result<String> {
            self.calls.borrow_mut().push((id, params.clone()));
            Ok(id.name().to_string())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, id: TemplateId, _params: &Params) -> Result<String> {
            if id == TemplateId::Controller {
                anyhow::bail!("broken template");
            }
            Ok(String::new())
        }
    }

    #[test]
    fn test_artifact_paths() {
        let r = article();
        let ts = options().timestamp;
        let path = |id| artifact_path(id, &r, ts).unwrap();
        assert_eq!(
            path(TemplateId::Migration),
            relative_path(&["database", "migrations", "2017_09_16_100350_create_articles.php"])
        );
        assert_eq!(path(TemplateId::Factory), relative_path(&["database", "factories", "ArticleFactory.php"]));
        assert_eq!(path(TemplateId::Test), relative_path(&["tests", "ArticleTest.php"]));
        assert_eq!(path(TemplateId::Model), relative_path(&["app", "Article.php"]));
        assert_eq!(path(TemplateId::Resource), relative_path(&["app", "Resources", "Article.php"]));
        assert_eq!(
            path(TemplateId::ResourceCollection),
            relative_path(&["app", "Resources", "ArticleCollection.php"])
        );
        assert_eq!(
            path(TemplateId::Controller),
            relative_path(&["app", "Http", "Controllers", "ArticleController.php"])
        );
        assert_eq!(path(TemplateId::Routes), relative_path(&["routes", "web.php"]));
    }

    #[test]
    fn test_plan_passes_same_descriptor_to_every_template() {
        let renderer = EchoRenderer::default();
        let artifacts = plan(&article(), &renderer, &options()).unwrap();
        assert_eq!(artifacts.len(), TemplateId::ALL.len());

        let calls = renderer.calls.borrow();
        let ids: Vec<_> = calls.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, TemplateId::ALL);
        for (id, params) in calls.iter() {
            assert_eq!(params["pascalName"], "Article");
            assert_eq!(params["useGeneratedKey"], true);
            assert_eq!(params.contains_key("inlineValidate"), *id == TemplateId::Controller);
        }
        let (_, controller) = calls.iter().find(|(id, _)| *id == TemplateId::Controller).unwrap();
        assert_eq!(controller["inlineValidate"], true);
        assert_eq!(controller["inlineSnakeCase"], false);
    }

    #[test]
    fn test_plan_wraps_contents() {
        let artifacts = plan(&article(), &EchoRenderer::default(), &options()).unwrap();
        let model = artifacts.iter().find(|a| a.template == TemplateId::Model).unwrap();
        assert_eq!(model.contents, "<?php\n\nmodel.php.j2\n");
        assert_eq!(model.mode, WriteMode::Create);
        let routes = artifacts.iter().find(|a| a.template == TemplateId::Routes).unwrap();
        assert_eq!(routes.contents, "\nroutes.php.j2\n");
        assert_eq!(routes.mode, WriteMode::Append);
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = plan(&article(), &FailingRenderer, &options());
        assert!(result.is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let routes = dir.path().join("routes/web.php");
        fs::create_dir_all(routes.parent().unwrap()).unwrap();
        fs::write(&routes, "<?php\n").unwrap();
        let model = dir.path().join("app/Article.php");
        fs::create_dir_all(model.parent().unwrap()).unwrap();
        fs::write(&model, "keep me").unwrap();

        let artifacts = plan(&article(), &JinjaRenderer::new().unwrap(), &options()).unwrap();
        let mut writer = ConfirmingWriter::new(Cursor::new(b"n\n".to_vec()), Vec::new(), false);
        let summary = write_all(dir.path(), &artifacts, &mut writer).unwrap();

        assert_eq!(summary.created.len(), 6);
        assert_eq!(summary.skipped, [model.clone()]);
        assert_eq!(summary.appended, [routes.clone()]);
        assert_eq!(fs::read_to_string(&model).unwrap(), "keep me");

        let controller = fs::read_to_string(dir.path().join("app/Http/Controllers/ArticleController.php")).unwrap();
        assert!(controller.starts_with("<?php\n\nnamespace App\\Http\\Controllers;"));
        let migration = dir.path().join("database/migrations/2017_09_16_100350_create_articles.php");
        assert!(fs::read_to_string(migration).unwrap().contains("$table->uuid('id');"));
        let routes = fs::read_to_string(&routes).unwrap();
        assert!(routes.starts_with("<?php\n\n$router->get('/articles', 'ArticleController@getMany');"));
        assert!(routes.ends_with("'ArticleController@create');\n"));
    }
}
