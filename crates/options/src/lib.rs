use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use schemars::JsonSchema;
use serde::{Deserialize as _, Deserializer};
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info};

mod error;

pub use self::error::{OptionsError, ParseFailure};

pub const OPTIONS_FILE_NAME: &str = "options.json";

pub const README_FILE_NAME: &str = "README.md";

pub const DEFAULT_PEACOCK_FOLDER: &str = "PATH TO PEACOCK";
pub const DEFAULT_PATCHER_EXE: &str = "NAME OF PEACOCK PATCHER EXE FILE";
pub const DEFAULT_SERVER_CMD: &str = "NAME OF PEACOCK SERVER CMD FILE";
pub const DEFAULT_SERVER_WINDOW_TITLE: &str = "Hitman Local Server";
pub const DEFAULT_EPIC_URI: &str = "com.epicgames.launcher://apps/ed55aa5edc5941de92fd7f64de415793%3A7d9ce7dd6f2e4ee98a55bd50a9bb78e0%3AEider?action=launch&silent=true";
pub const DEFAULT_CLOSE_DELAY_SECONDS: i32 = 5;

/// Written next to `options.json` the first time the launcher runs.
pub const INSTRUCTIONS: &str = r#"# Before editing options.json

- JSON strings need every backslash doubled, so a Windows path looks like
  `C:\\Games\\Peacock`.
- Every field is required. Do not remove any of them.
- `CloseDelaySeconds` must be zero or a positive number of seconds.
"#;

/// Settings read from `config/options.json`.
///
/// Text keys that are missing from the document or set to `null` deserialize to empty strings so
/// they are reported by [`LaunchOptions::invalid_fields`] instead of failing to parse.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchOptions {
    /// Directory containing the Peacock installation.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub peacock_folder: String,

    /// File name of the Peacock patcher executable, relative to `PeacockFolder`.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub patcher_exe: String,

    /// File name of the script that starts the Peacock server, relative to `PeacockFolder`.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub server_cmd: String,

    /// Title of the terminal window the server runs in.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub server_window_title: String,

    /// Launcher URI that starts the game.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub epic_uri: String,

    /// Seconds to wait after starting the game before the launcher exits.
    #[serde(default)]
    pub close_delay_seconds: i32,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            peacock_folder: DEFAULT_PEACOCK_FOLDER.to_owned(),
            patcher_exe: DEFAULT_PATCHER_EXE.to_owned(),
            server_cmd: DEFAULT_SERVER_CMD.to_owned(),
            server_window_title: DEFAULT_SERVER_WINDOW_TITLE.to_owned(),
            epic_uri: DEFAULT_EPIC_URI.to_owned(),
            close_delay_seconds: DEFAULT_CLOSE_DELAY_SECONDS,
        }
    }
}

impl LaunchOptions {
    pub fn from_json(json: &str) -> Result<Self, ParseFailure> {
        // Notepad likes to save UTF-8 with a byte order mark.
        let json = json.strip_prefix('\u{feff}').unwrap_or(json);

        serde_json::from_str::<Option<Self>>(json)?.ok_or(ParseFailure::Null)
    }

    /// Indented JSON document, terminated by a newline.
    pub fn to_document(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|json| json + "\n")
    }

    /// Names of the fields that are empty or out of range, in document order.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("PeacockFolder", &self.peacock_folder),
            ("PatcherExe", &self.patcher_exe),
            ("ServerCmd", &self.server_cmd),
            ("ServerWindowTitle", &self.server_window_title),
            ("EpicUri", &self.epic_uri),
        ];

        let mut invalid: Vec<_> = text_fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if self.close_delay_seconds < 0 {
            invalid.push("CloseDelaySeconds");
        }

        invalid
    }

    pub fn install_dir(&self) -> &Path {
        Path::new(&self.peacock_folder)
    }

    pub fn patcher_path(&self) -> PathBuf {
        self.install_dir().join(&self.patcher_exe)
    }

    pub fn server_cmd_path(&self) -> PathBuf {
        self.install_dir().join(&self.server_cmd)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.close_delay_seconds).unwrap_or(0))
    }
}

/// Result of [`OptionsDir::load_or_bootstrap`].
#[derive(Debug)]
pub enum Loaded {
    /// No options existed; defaults were written to the given path.
    Bootstrapped(PathBuf),

    /// Options were read and validated.
    Existing(LaunchOptions),
}

/// The directory holding `options.json` and its instructions document.
#[derive(Clone, Debug)]
pub struct OptionsDir {
    dir: Box<Path>,
}

impl OptionsDir {
    pub fn new<P: Into<Box<Path>>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn options_path(&self) -> PathBuf {
        self.dir.join(OPTIONS_FILE_NAME)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.dir.join(README_FILE_NAME)
    }

    pub fn is_initialized(&self) -> bool {
        self.options_path().is_file()
    }

    /// Create the directory and write the placeholder options and instructions document.
    pub fn bootstrap(&self) -> Result<PathBuf, OptionsError> {
        fs::create_dir_all(&self.dir).map_err(|source| OptionsError::CreateDir {
            path: self.dir.to_path_buf(),
            source,
        })?;

        let options_path = self.options_path();
        let document =
            LaunchOptions::default()
                .to_document()
                .map_err(|error| OptionsError::Write {
                    path: options_path.clone(),
                    source: io::Error::other(error),
                })?;

        write_file(&options_path, document)?;
        write_file(&self.readme_path(), INSTRUCTIONS)?;

        info!(?options_path, "wrote default options");

        Ok(options_path)
    }

    /// Read, parse and validate `options.json`. The file is never modified.
    pub fn load(&self) -> Result<LaunchOptions, OptionsError> {
        let path = self.options_path();
        debug!(?path, "loading options");

        let json = fs::read_to_string(&path).map_err(|source| OptionsError::Read {
            path: path.clone(),
            source,
        })?;

        let options = LaunchOptions::from_json(&json).map_err(|source| OptionsError::Parse {
            path: path.clone(),
            source,
        })?;

        let fields = options.invalid_fields();
        if !fields.is_empty() {
            return Err(OptionsError::Validation { path, fields });
        }

        Ok(options)
    }

    pub fn load_or_bootstrap(&self) -> Result<Loaded, OptionsError> {
        if self.is_initialized() {
            self.load().map(Loaded::Existing)
        } else {
            self.bootstrap().map(Loaded::Bootstrapped)
        }
    }
}

fn write_file<C: AsRef<[u8]>>(path: &Path, contents: C) -> Result<(), OptionsError> {
    fs::write(path, contents).map_err(|source| OptionsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod test {
    use std::{error::Error, fs};

    use assert_fs::prelude::{FileWriteStr, PathChild};
    use expect_test::expect;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_document_uses_placeholders() -> Result<(), Box<dyn Error>> {
        let document = LaunchOptions::default().to_document()?;

        expect![[r#"
            {
              "PeacockFolder": "PATH TO PEACOCK",
              "PatcherExe": "NAME OF PEACOCK PATCHER EXE FILE",
              "ServerCmd": "NAME OF PEACOCK SERVER CMD FILE",
              "ServerWindowTitle": "Hitman Local Server",
              "EpicUri": "com.epicgames.launcher://apps/ed55aa5edc5941de92fd7f64de415793%3A7d9ce7dd6f2e4ee98a55bd50a9bb78e0%3AEider?action=launch&silent=true",
              "CloseDelaySeconds": 5
            }
        "#]]
        .assert_eq(&document);

        Ok(())
    }

    #[test]
    fn serialized_options_read_back_unchanged() -> Result<(), Box<dyn Error>> {
        let options = LaunchOptions {
            peacock_folder: r"C:\Games\Peacock".to_owned(),
            patcher_exe: "PeacockPatcher.exe".to_owned(),
            server_cmd: "Start Server.cmd".to_owned(),
            server_window_title: "Peacock".to_owned(),
            epic_uri: "com.epicgames.launcher://apps/hitman".to_owned(),
            close_delay_seconds: 12,
        };

        let read_back = LaunchOptions::from_json(&options.to_document()?)?;

        assert_eq!(options, read_back);
        Ok(())
    }

    #[test]
    fn missing_keys_are_reported_as_invalid() -> Result<(), Box<dyn Error>> {
        let options = LaunchOptions::from_json(r#"{ "PeacockFolder": "C:\\Peacock" }"#)?;

        assert_eq!(
            vec!["PatcherExe", "ServerCmd", "ServerWindowTitle", "EpicUri"],
            options.invalid_fields()
        );
        assert_eq!(0, options.close_delay_seconds);
        Ok(())
    }

    #[test]
    fn null_text_fields_are_reported_as_invalid() -> Result<(), Box<dyn Error>> {
        let options = LaunchOptions::from_json(
            r#"{
                "PeacockFolder": null,
                "PatcherExe": "PeacockPatcher.exe",
                "ServerCmd": null,
                "ServerWindowTitle": "Hitman Local Server",
                "EpicUri": "com.epicgames.launcher://apps/hitman",
                "CloseDelaySeconds": 5
            }"#,
        )?;

        assert_eq!(vec!["PeacockFolder", "ServerCmd"], options.invalid_fields());
        assert_eq!("", options.peacock_folder);
        Ok(())
    }

    #[test]
    fn close_delay_beyond_i32_fails_to_parse() {
        let result = LaunchOptions::from_json(r#"{ "CloseDelaySeconds": 3000000000 }"#);

        assert!(matches!(result, Err(ParseFailure::Json(_))));
    }

    #[test]
    fn whitespace_and_negative_delay_are_invalid() {
        let options = LaunchOptions {
            server_window_title: " \t".to_owned(),
            close_delay_seconds: -1,
            ..Default::default()
        };

        assert_eq!(
            vec!["ServerWindowTitle", "CloseDelaySeconds"],
            options.invalid_fields()
        );
        assert_eq!(Duration::ZERO, options.close_delay());
    }

    #[test]
    fn null_document_is_a_parse_failure() {
        let result = LaunchOptions::from_json("null");

        assert!(matches!(result, Err(ParseFailure::Null)));
    }

    #[test]
    fn byte_order_mark_is_ignored() -> Result<(), Box<dyn Error>> {
        let document = format!("\u{feff}{}", LaunchOptions::default().to_document()?);

        assert_eq!(LaunchOptions::default(), LaunchOptions::from_json(&document)?);
        Ok(())
    }

    #[test]
    fn bootstrap_creates_folder_and_instructions() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let dir = OptionsDir::new(temp_dir.child("config").path());

        assert!(!dir.is_initialized());

        let Loaded::Bootstrapped(path) = dir.load_or_bootstrap()? else {
            panic!("expected a first run to bootstrap the options");
        };

        assert_eq!(dir.options_path(), path);
        assert_eq!(INSTRUCTIONS, fs::read_to_string(dir.readme_path())?);
        assert_eq!(LaunchOptions::default(), dir.load()?);
        Ok(())
    }

    #[test]
    fn bootstrap_reports_folder_creation_failure() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let blocker = temp_dir.child("config");
        blocker.write_str("not a directory")?;

        let error = OptionsDir::new(blocker.path())
            .bootstrap()
            .expect_err("a file in place of the folder should fail");

        assert!(matches!(error, OptionsError::CreateDir { .. }));
        assert_eq!(1, error.exit_code());
        Ok(())
    }

    #[test]
    fn malformed_document_is_left_untouched() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let options = temp_dir.child(OPTIONS_FILE_NAME);
        options.write_str("{ \"PeacockFolder\": ")?;

        let error = OptionsDir::new(temp_dir.path())
            .load()
            .expect_err("truncated JSON should not parse");

        assert!(matches!(
            error,
            OptionsError::Parse {
                source: ParseFailure::Json(_),
                ..
            }
        ));
        assert_eq!("{ \"PeacockFolder\": ", fs::read_to_string(options.path())?);
        Ok(())
    }

    #[test]
    fn validation_error_names_fields() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let invalid = LaunchOptions {
            peacock_folder: String::new(),
            ..Default::default()
        };
        temp_dir
            .child(OPTIONS_FILE_NAME)
            .write_str(&invalid.to_document()?)?;

        let error = OptionsDir::new(temp_dir.path())
            .load()
            .expect_err("empty PeacockFolder should fail validation");

        let OptionsError::Validation { fields, .. } = &error else {
            panic!("expected a validation error, got {error:?}");
        };

        assert_eq!(&vec!["PeacockFolder"], fields);
        assert!(error.to_string().ends_with("PeacockFolder"));
        Ok(())
    }
}
