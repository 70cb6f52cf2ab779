//! Integration tests for vaultenv

mod stub {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};

    /// Minimal Vault stand-in answering canned `(path, body)` routes with 200
    pub struct StubVault {
        pub address: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl StubVault {
        pub fn start(routes: Vec<(String, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let address = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));
            let seen = Arc::clone(&requests);

            std::thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(mut stream) = stream else { break };
                    let mut raw = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf) {
                            Ok(0) | Err(_) => break,
                            Ok(n) => raw.extend_from_slice(&buf[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&raw).to_string();
                    let path = request.split_whitespace().nth(1).unwrap_or("").to_string();
                    seen.lock().unwrap().push(path.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|(route, _)| *route == path)
                        .map(|(_, body)| ("200 OK", *body))
                        .unwrap_or(("404 Not Found", "{\"errors\":[]}"));
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes());
                }
            });

            Self { address, requests }
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }
}

mod cli_tests {
    use super::stub::StubVault;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;
    use vaultenv::cache::derive_file_name;

    /// Isolated home with a token, a fake tmpfs and a config pointing at both
    struct Sandbox {
        home: TempDir,
    }

    impl Sandbox {
        fn new(vault_address: &str, versioned: bool, with_token: bool) -> Self {
            let home = TempDir::new().unwrap();
            std::fs::create_dir(home.path().join("shm")).unwrap();
            if with_token {
                std::fs::write(home.path().join(".vault-token"), "hvs.integration\n").unwrap();
            }
            std::fs::write(
                home.path().join("config.toml"),
                format!(
                    "[vault]\naddress = '{}'\ntimeout_secs = 5\nversioned = {}\n\n[mount]\nshm_path = '{}'\n",
                    vault_address,
                    versioned,
                    home.path().join("shm").display()
                ),
            )
            .unwrap();
            Self { home }
        }

        fn shm(&self) -> std::path::PathBuf {
            self.home.path().join("shm")
        }

        fn cmd(&self) -> Command {
            let mut cmd = vaultenv();
            cmd.env("HOME", self.home.path())
                .env_remove("VAULT_ADDR")
                .env_remove("VAULT_NAMESPACE")
                .env_remove("VAULT_CLIENT_TIMEOUT")
                .arg("--config")
                .arg(self.home.path().join("config.toml"));
            cmd
        }
    }

    fn vaultenv() -> Command {
        let mut cmd = cargo_bin_cmd!("vaultenv");
        cmd.env_remove("VAULTENV_CONFIG");
        cmd
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn help_displays() {
        vaultenv()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Vault secrets as sourceable env files"));
    }

    #[test]
    fn version_displays() {
        vaultenv()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("vaultenv"));
    }

    #[test]
    fn secret_argument_required() {
        vaultenv().assert().failure();
    }

    #[test]
    fn invalid_reference_rejected() {
        let sandbox = Sandbox::new("http://127.0.0.1:9", true, true);
        sandbox
            .cmd()
            .arg("no-slash")
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("expected <mount>/<path>"));
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        let vault = StubVault::start(vec![]);
        let sandbox = Sandbox::new(&vault.address, true, false);

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Unable to read Vault token"))
            .stderr(predicate::str::contains("vault login"));

        assert!(vault.requests().is_empty());
        assert_eq!(entries(&sandbox.shm()), 0);
    }

    #[test]
    fn invalid_config_fails() {
        let sandbox = Sandbox::new("http://127.0.0.1:9", true, true);
        std::fs::write(sandbox.home.path().join("config.toml"), "[vault\n").unwrap();

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn cold_cache_fetches_and_prints_path() {
        let vault = StubVault::start(vec![
            (
                "/v1/kv/metadata/app/db".to_string(),
                r#"{"data":{"current_version":3}}"#,
            ),
            (
                "/v1/kv/data/app/db?version=3".to_string(),
                r#"{"data":{"data":{"HOST":"db1"},"metadata":{"version":3}}}"#,
            ),
        ]);
        let sandbox = Sandbox::new(&vault.address, true, true);
        let expected = sandbox.shm().join(derive_file_name("kv/app/db", Some(3)));

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .success()
            .stdout(expected.display().to_string());

        assert_eq!(std::fs::read_to_string(&expected).unwrap(), "HOST=\"db1\"\n");
        assert_eq!(
            vault.requests(),
            vec!["/v1/kv/metadata/app/db", "/v1/kv/data/app/db?version=3"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reserved_characters_reach_the_right_secret() {
        let vault = StubVault::start(vec![
            (
                "/v1/kv/metadata/team%20a/db%231".to_string(),
                r#"{"data":{"current_version":2}}"#,
            ),
            (
                "/v1/kv/data/team%20a/db%231?version=2".to_string(),
                r#"{"data":{"data":{"HOST":"db-a"},"metadata":{"version":2}}}"#,
            ),
        ]);
        let sandbox = Sandbox::new(&vault.address, true, true);
        let expected = sandbox
            .shm()
            .join(derive_file_name("kv/team a/db#1", Some(2)));

        sandbox
            .cmd()
            .arg("kv/team a/db#1")
            .assert()
            .success()
            .stdout(expected.display().to_string());

        assert_eq!(std::fs::read_to_string(&expected).unwrap(), "HOST=\"db-a\"\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn warm_cache_skips_secret_read() {
        let vault = StubVault::start(vec![(
            "/v1/kv/metadata/app/db".to_string(),
            r#"{"data":{"current_version":3}}"#,
        )]);
        let sandbox = Sandbox::new(&vault.address, true, true);
        let expected = sandbox.shm().join(derive_file_name("kv/app/db", Some(3)));
        std::fs::write(&expected, "HOST=\"cached\"\n").unwrap();

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .success()
            .stdout(expected.display().to_string());

        assert_eq!(vault.requests(), vec!["/v1/kv/metadata/app/db"]);
        assert_eq!(
            std::fs::read_to_string(&expected).unwrap(),
            "HOST=\"cached\"\n"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unversioned_hit_needs_no_vault() {
        // Nothing listens on the discard port; a request would fail the run
        let sandbox = Sandbox::new("http://127.0.0.1:9", false, true);
        let expected = sandbox.shm().join(derive_file_name("kv/app/db", None));
        std::fs::write(&expected, "HOST=\"cached\"\n").unwrap();

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .success()
            .stdout(expected.display().to_string());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn missing_secret_fails_without_writing() {
        let vault = StubVault::start(vec![(
            "/v1/kv/metadata/app/db".to_string(),
            r#"{"data":{"current_version":1}}"#,
        )]);
        let sandbox = Sandbox::new(&vault.address, true, true);

        sandbox
            .cmd()
            .arg("kv/app/db")
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Secret not found: kv/app/db"));

        assert_eq!(entries(&sandbox.shm()), 0);
    }
}
