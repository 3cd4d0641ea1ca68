use crate::command::ResourceArgs;
use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use scaffold_core::ResourceDescriptor;

/// Print the parsed fields and derived key strategy without generating anything.
#[derive(Parser, Debug)]
pub struct Info {
    #[command(flatten)]
    args: ResourceArgs,
}

fn key_strategy(descriptor: &ResourceDescriptor) -> &'static str {
    if descriptor.use_generated_key() {
        "generated by the application (uuid)"
    } else if descriptor.has_auto_increment_primary_key() {
        "auto-increment"
    } else if descriptor.uses_default_key() {
        "default `id` column"
    } else if descriptor.primary_key_fields().is_empty() {
        "declared `id` column"
    } else {
        "explicit"
    }
}

impl Info {
    pub fn run(self) -> Result<()> {
        let descriptor = self.args.descriptor()?;
        eprintln!("Resource: {} ({})", descriptor.pascal_name(), descriptor.camel_name());
        eprintln!("Plural: {}", descriptor.plural_name());
        let keys = descriptor.primary_key_fields().iter().map(|f| f.name.as_str()).join(", ");
        eprintln!("Primary key: [{}] {}", keys, key_strategy(&descriptor));
        eprintln!("Soft deletes: {}", descriptor.soft_deletes_enabled());
        for field in descriptor.fields() {
            let mut flags = vec![];
            if field.is_primary_key {
                flags.push("primary");
            }
            if field.is_incrementing {
                flags.push("increments");
            }
            if field.is_nullable {
                flags.push("nullable");
            }
            let known = if field.ty.is_known() { "" } else { " (opaque)" };
            eprintln!("  {}: {}{} {}", field.name, field.ty, known, flags.join(" "));
        }
        Ok(())
    }
}
