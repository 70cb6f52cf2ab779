//! Command runner fake shared by the mount and materializer tests

use crate::error::{VaultenvError, VaultenvResult};
use crate::mount::runner::{command_line, CommandRunner};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

/// Records invocations; `diskutil` "mounts" by creating the directory
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    mount_point: PathBuf,
    pub attach_output: &'static str,
    pub fail_partition: bool,
    pub mount_on_partition: bool,
}

impl FakeRunner {
    pub fn new(mount_point: PathBuf) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mount_point,
            attach_output: "/dev/disk4          \t\n",
            fail_partition: false,
            mount_on_partition: true,
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose program and first argument match
    pub fn count(&self, program: &str, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(p, args)| p == program && args.first().map(String::as_str) == Some(subcommand))
            .count()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> VaultenvResult<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        match (program, args.first().map(String::as_str)) {
            ("hdiutil", Some("attach")) => Ok(self.attach_output.as_bytes().to_vec()),
            ("hdiutil", Some("detach")) => Ok(Vec::new()),
            ("diskutil", _) if self.fail_partition => Err(VaultenvError::command_exec(
                command_line(program, args),
                "resource busy",
            )),
            ("diskutil", _) => {
                if self.mount_on_partition {
                    std::fs::create_dir_all(&self.mount_point).unwrap();
                }
                Ok(Vec::new())
            }
            _ => panic!("unexpected command {}", command_line(program, args)),
        }
    }
}
