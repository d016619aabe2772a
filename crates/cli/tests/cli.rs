use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            root: tempdir().unwrap(),
        }
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.root.path().join("data")
    }

    #[allow(deprecated)]
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("farmer").expect("binary");
        cmd.current_dir(self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("config-home"))
            .env_remove("FARMER_CONFIG")
            .env_remove("FARMER_DATA_DIR")
            .env_remove("FARMER_REMOTE_URL")
            .env_remove("FARMER_AUTH_TOKEN")
            .env_remove("FARMER_REFERENCE_URL")
            .arg("--quiet")
            .arg("--data-dir")
            .arg(self.data_dir());
        cmd
    }

    fn run_raw(&self, args: &[&str]) -> (bool, Value) {
        let output = self.command().args(args).output().expect("command run");
        let body: Value = if output.stdout.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&output.stdout).expect("valid json")
        };
        (output.status.success(), body)
    }

    fn run(&self, args: &[&str]) -> Value {
        let (ok, body) = self.run_raw(args);
        assert!(ok, "farmer {args:?} failed: {body}");
        body
    }
}

#[test]
fn text_profile_lifecycle() {
    let ws = Workspace::new();

    let path = ws.run(&["text", "path"]);
    let path = path["path"].as_str().unwrap().to_string();
    assert!(Path::new(&path).is_absolute());
    assert!(path.ends_with("farmer_profile.txt"));

    let written = ws.run(&["text", "write", "I grow groundnut"]);
    assert_eq!(written["action"], "write");
    assert_eq!(written["ok"], true);
    assert_eq!(written["size_bytes"], 16);

    ws.run(&["text", "append", " and jowar."]);
    let read = ws.run(&["text", "read"]);
    assert_eq!(read["content"], "I grow groundnut and jowar.");
    assert_eq!(read["has_content"], true);

    let validation = ws.run(&["text", "validate"]);
    assert_eq!(validation["is_valid"], true);
    assert_eq!(validation["warnings"], serde_json::json!(["short"]));

    let chunks = ws.run(&["text", "chunks"]);
    assert_eq!(chunks["count"], 1);

    ws.run(&["text", "clear"]);
    let stats = ws.run(&["text", "stats"]);
    assert_eq!(stats["exists"], true);
    assert_eq!(stats["char_count"], 0);
    assert_eq!(stats["chunk_count"], 0);

    ws.run(&["text", "delete"]);
    let stats = ws.run(&["text", "stats"]);
    assert_eq!(stats["exists"], false);

    // deleting again is still a success
    ws.run(&["text", "delete"]);
}

#[test]
fn text_write_reads_from_file() {
    let ws = Workspace::new();
    let source = ws.root.path().join("profile.txt");
    let long = "paddy ".repeat(200);
    std::fs::write(&source, &long).unwrap();

    ws.run(&["text", "write", "--file", source.to_str().unwrap()]);
    let chunks = ws.run(&["text", "chunks"]);
    let count = chunks["count"].as_u64().unwrap();
    assert!(count > 1, "expected several chunks, got {count}");
    for chunk in chunks["chunks"].as_array().unwrap() {
        assert!(chunk.as_str().unwrap().chars().count() <= 500);
    }
}

#[test]
fn register_works_offline_and_persists_locally() {
    let ws = Workspace::new();

    let registered = ws.run(&[
        "register",
        "u1",
        "--phone",
        "+91 98765 43210",
        "--name",
        "Lakshmi",
        "--crop",
        "banana,coconut",
    ]);
    assert_eq!(registered["flow"], "registration");
    assert_eq!(registered["ok"], true);
    assert_eq!(registered["profile"]["name"], "Lakshmi");
    assert_eq!(
        registered["profile"]["crops"],
        serde_json::json!(["banana", "coconut"])
    );

    let shown = ws.run(&["show", "--user-id", "u1"]);
    assert_eq!(shown["found"], true);
    assert_eq!(shown["profile"]["userId"], "u1");

    let by_phone = ws.run(&["show", "--phone", "09876543210"]);
    assert_eq!(by_phone["profile"]["userId"], "u1");

    assert!(ws.data_dir().join("profiles.json").is_file());
}

#[test]
fn edit_updates_local_profile_and_stamps_it() {
    let ws = Workspace::new();
    let registered = ws.run(&["register", "u1", "--phone", "9876543210"]);
    let created = registered["profile"]["lastUpdated"].as_u64().unwrap();

    let edited = ws.run(&["edit", "u1", "--village", "Tiptur", "--land-acres", "3.5"]);
    assert_eq!(edited["flow"], "edit");
    assert_eq!(edited["ok"], true);
    assert_eq!(edited["profile"]["village"], "Tiptur");
    assert_eq!(edited["profile"]["landAcres"], 3.5);
    assert!(edited["profile"]["lastUpdated"].as_u64().unwrap() >= created);

    let shown = ws.run(&["show", "--user-id", "u1"]);
    assert_eq!(shown["profile"]["village"], "Tiptur");
}

#[test]
fn edit_without_local_profile_fails() {
    let ws = Workspace::new();
    let (ok, _) = ws.run_raw(&["edit", "ghost", "--name", "Nobody"]);
    assert!(!ok);
}

#[test]
fn login_without_remote_reports_failure() {
    let ws = Workspace::new();
    let (ok, body) = ws.run_raw(&["login", "u1"]);
    assert!(!ok);
    assert_eq!(body["flow"], "login");
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

#[test]
fn logout_succeeds_offline_and_keeps_local_data() {
    let ws = Workspace::new();
    ws.run(&["register", "u1", "--phone", "9876543210"]);

    let logout = ws.run(&["logout", "u1"]);
    assert_eq!(logout["ok"], true);
    assert!(logout.get("profile").is_none());

    let shown = ws.run(&["show", "--user-id", "u1"]);
    assert_eq!(shown["found"], true);
}

#[test]
fn clear_local_removes_profile() {
    let ws = Workspace::new();
    ws.run(&["register", "u1", "--phone", "9876543210"]);

    let cleared = ws.run(&["clear-local", "u1"]);
    assert_eq!(cleared["cleared"], true);

    let shown = ws.run(&["show", "--user-id", "u1"]);
    assert_eq!(shown["found"], false);
    assert_eq!(shown["profile"], Value::Null);
}

#[test]
fn exists_is_false_without_remote() {
    let ws = Workspace::new();
    let body = ws.run(&["exists", "u1"]);
    assert_eq!(body["exists"], false);
}

#[test]
fn invalid_config_file_is_rejected() {
    let ws = Workspace::new();
    let config = ws.root.path().join("farmer.toml");
    std::fs::write(&config, "[chunking]\nchunk_size = 10\noverlap = 9\n").unwrap();

    let (ok, body) = ws.run_raw(&["--config", config.to_str().unwrap(), "text", "path"]);
    assert!(!ok);
    assert_eq!(body, Value::Null);
}

#[test]
fn config_file_sets_chunk_size() {
    let ws = Workspace::new();
    let config = ws.root.path().join("farmer.toml");
    std::fs::write(&config, "[chunking]\nchunk_size = 100\noverlap = 10\n").unwrap();
    let config = config.to_str().unwrap().to_string();

    ws.run(&["--config", &config, "text", "write", &"millet ".repeat(40)]);
    let chunks = ws.run(&["--config", &config, "text", "chunks"]);
    for chunk in chunks["chunks"].as_array().unwrap() {
        assert!(chunk.as_str().unwrap().chars().count() <= 100);
    }
    assert!(chunks["count"].as_u64().unwrap() >= 3);
}

#[test]
fn reference_requires_endpoint() {
    let ws = Workspace::new();
    let (ok, _) = ws.run_raw(&["reference", "schemes"]);
    assert!(!ok);
}
