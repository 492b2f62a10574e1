//! Class definition input shared by every generating command

use anyhow::{bail, Context, Result};
use clap::Args;
use halgen::ClassDefinition;
use std::path::PathBuf;

/// Where the template class comes from
#[derive(Debug, Args)]
pub struct ClassInput {
    /// Template class name (e.g. `Stage`)
    #[arg(required_unless_present = "from")]
    pub name: Option<String>,

    /// Member specifications: `name` or `name(arg, ...)`
    #[arg(value_name = "MEMBER")]
    pub members: Vec<String>,

    /// Read the class description from a TOML or JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["name", "members"])]
    pub from: Option<PathBuf>,
}

impl ClassInput {
    /// Resolve the class definition
    ///
    /// # Errors
    ///
    /// Returns an error if the description file cannot be loaded or a member
    /// specification is invalid.
    pub fn definition(&self) -> Result<ClassDefinition> {
        match (&self.from, &self.name) {
            (Some(path), _) => ClassDefinition::load(path)
                .with_context(|| format!("Failed to load class description: {}", path.display())),
            (None, Some(name)) => ClassDefinition::parse(name, &self.members)
                .context("Failed to parse class definition"),
            (None, None) => bail!("Either a class name or --from <FILE> is required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_arguments() {
        let input = ClassInput {
            name: Some("Stage".to_string()),
            members: vec!["__init__".to_string(), "setValue(v)".to_string()],
            from: None,
        };

        let definition = input.definition().unwrap();
        assert_eq!(definition.name, "Stage");
        assert_eq!(definition.members[1].args, vec!["v"]);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("laser.toml");
        std::fs::write(&path, "name = \"Laser\"\nmembers = [\"__init__\", \"getPower\"]\n").unwrap();

        let input = ClassInput {
            name: None,
            members: vec![],
            from: Some(path),
        };

        let definition = input.definition().unwrap();
        assert_eq!(definition.name, "Laser");
        assert_eq!(definition.members.len(), 2);
    }

    #[test]
    fn test_missing_file_has_context() {
        let input = ClassInput {
            name: None,
            members: vec![],
            from: Some(PathBuf::from("/nonexistent/laser.toml")),
        };

        let err = input.definition().unwrap_err();
        assert!(err.to_string().contains("Failed to load class description"));
    }

    #[test]
    fn test_invalid_member() {
        let input = ClassInput {
            name: Some("Stage".to_string()),
            members: vec!["set value".to_string()],
            from: None,
        };

        assert!(input.definition().is_err());
    }
}
