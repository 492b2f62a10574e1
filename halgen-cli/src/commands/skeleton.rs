//! Class skeleton command

use super::ClassInput;
use anyhow::Result;
use clap::Args;
use halgen::ClassBuilder;
use std::io::Write;

/// Print a bare class skeleton with one stub per member
#[derive(Debug, Args)]
pub struct SkeletonCommand {
    #[command(flatten)]
    input: ClassInput,
}

impl SkeletonCommand {
    /// Execute the skeleton command
    ///
    /// Unlike `proxy`, a constructor is not required.
    ///
    /// # Errors
    ///
    /// Returns an error if the class definition cannot be resolved.
    pub fn execute(&self, out: &mut impl Write) -> Result<()> {
        let definition = self.input.definition()?;
        let skeleton = ClassBuilder::from_definition(&definition).build_string();
        out.write_all(skeleton.as_bytes())?;
        Ok(())
    }
}
