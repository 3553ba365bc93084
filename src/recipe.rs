//! The desired installation state.
//!
//! [`DesiredState`] is the single fixed provisioning recipe: where the
//! client lands on disk, which remote files it needs, which repositories
//! back the visualization code, and which packages go into its virtual
//! environment. It is built once from command-line input plus the constants
//! below and never mutated afterwards.

use crate::patch::PatchRule;
use std::path::PathBuf;

/// Base URL for raw files in the client repository.
pub const RAW_BASE: &str = "https://raw.githubusercontent.com/foonerd/peppy_remote/main";

/// Main client entry script, downloaded into the install root.
pub const CLIENT_SCRIPT: &str = "peppy_remote.py";

/// Handler files downloaded into `screensaver/` and patched for local icons.
pub const HANDLER_FILES: &[&str] = &[
    "volumio_peppymeter.py",
    "volumio_turntable.py",
    "volumio_cassette.py",
    "volumio_basic.py",
];

/// Fonts downloaded into `screensaver/fonts/`.
pub const FONT_FILES: &[&str] = &["DejaVuSans.ttf", "DejaVuSans-Bold.ttf"];

/// Every audio format the client can label with an icon.
///
/// Also drives the handler patch: the stock handlers only check a handful
/// of formats against the local icon directory.
pub const FORMAT_ICONS: &[&str] = &[
    "aac", "aiff", "airplay", "alac", "bt", "cd", "dab", "dsd", "dts", "flac", "fm", "m4a", "mp3",
    "mp4", "mqa", "ogg", "opus", "qobuz", "radio", "rr", "spotify", "tidal", "wav", "wavpack",
    "wma", "youtube",
];

/// Pre-patch icon-set literals found in stock handler files.
const STOCK_ICON_SETS: &[&str] = &[
    "local_icons = {'tidal', 'cd', 'qobuz', 'dab', 'fm', 'radio'}",
    "local_icons = {'tidal', 'cd', 'qobuz'}",
];

/// Packages installed into the client's virtual environment.
pub const PIP_PACKAGES: &[&str] = &[
    "pygame",
    "python-socketio[client]",
    "requests",
    "cairosvg",
];

/// Repositories cloned under `screensaver/`.
pub const REPOSITORIES: &[(&str, &str)] = &[
    ("peppymeter", "https://github.com/project-owner/PeppyMeter.git"),
    ("spectrum", "https://github.com/project-owner/PeppySpectrum.git"),
];

/// Interpreter command candidates, tried in order.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python", "py"];

/// Minimum interpreter version (major, minor).
pub const MIN_PYTHON: (u32, u32) = (3, 7);

/// Versioned archive holding the native rendering libraries.
pub const NATIVE_ARCHIVE_URL: &str =
    "https://github.com/preshing/cairo-windows/releases/download/with-tee/cairo-windows-1.17.2.zip";

/// Library stems the native runtime needs, matched against archive entries.
pub const NATIVE_LIB_STEMS: &[&str] = &["cairo", "freetype"];

/// Default install directory name, created under the home directory.
const DEFAULT_DIR_NAME: &str = "peppy_remote";

/// Immutable description of the target installation.
#[derive(Debug, Clone)]
pub struct DesiredState {
    /// Install root.
    pub install_dir: PathBuf,

    /// Server host to pre-fill in the generated config; `None` means
    /// auto-discover.
    pub server: Option<String>,

    /// Whether this platform needs the separately acquired native
    /// rendering libraries.
    pub wants_native_runtime: bool,
}

impl DesiredState {
    /// Build the desired state from command-line input.
    pub fn new(dir: Option<PathBuf>, server: Option<String>) -> Self {
        let install_dir = dir.unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_DIR_NAME)
        });

        Self {
            install_dir,
            server,
            // Unix systems get cairo through the system package set;
            // only Windows needs the standalone library pair.
            wants_native_runtime: cfg!(target_os = "windows"),
        }
    }

    /// `screensaver/` subtree holding repositories, handlers and assets.
    pub fn screensaver_dir(&self) -> PathBuf {
        self.install_dir.join("screensaver")
    }

    /// Virtual environment directory.
    pub fn venv_dir(&self) -> PathBuf {
        self.install_dir.join("venv")
    }

    /// Font directory under the screensaver subtree.
    pub fn fonts_dir(&self) -> PathBuf {
        self.screensaver_dir().join("fonts")
    }

    /// Format icon directory under the screensaver subtree.
    pub fn icons_dir(&self) -> PathBuf {
        self.screensaver_dir().join("format-icons")
    }

    /// Directory receiving the native library pair.
    pub fn native_dir(&self) -> PathBuf {
        self.install_dir.join("cairo")
    }

    /// Generated client configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.install_dir.join("config.json")
    }

    /// Main client script inside the install root.
    pub fn client_script_path(&self) -> PathBuf {
        self.install_dir.join(CLIENT_SCRIPT)
    }

    /// Checkout directory for a named repository.
    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.screensaver_dir().join(name)
    }

    /// URL of a file at the repository root.
    pub fn remote_url(file: &str) -> String {
        format!("{RAW_BASE}/{file}")
    }

    /// URL of a bundled font.
    pub fn font_url(file: &str) -> String {
        format!("{RAW_BASE}/fonts/{file}")
    }

    /// URL of a format icon.
    pub fn icon_url(name: &str) -> String {
        format!("{RAW_BASE}/format-icons/{name}.svg")
    }
}

/// The full icon-set literal written into patched handlers.
pub fn full_icon_set_literal() -> String {
    let quoted: Vec<String> = FORMAT_ICONS.iter().map(|i| format!("'{i}'")).collect();
    format!("local_icons = {{{}}}", quoted.join(", "))
}

/// Rewrite rules widening the stock handler icon sets to every known format.
///
/// Idempotent: the replacement literal contains 26 entries and matches
/// neither stock pattern.
pub fn handler_patch_rules() -> Vec<PatchRule> {
    let replacement = full_icon_set_literal();
    STOCK_ICON_SETS
        .iter()
        .map(|pattern| PatchRule::new(*pattern, replacement.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::apply_rules;
    use std::path::Path;

    #[test]
    fn default_install_dir_is_under_home() {
        let desired = DesiredState::new(None, None);
        assert!(desired.install_dir.ends_with(DEFAULT_DIR_NAME));
    }

    #[test]
    fn explicit_dir_overrides_default() {
        let desired = DesiredState::new(Some(PathBuf::from("/opt/peppy")), None);
        assert_eq!(desired.install_dir, Path::new("/opt/peppy"));
    }

    #[test]
    fn layout_paths_nest_under_install_dir() {
        let desired = DesiredState::new(Some(PathBuf::from("/opt/peppy")), None);
        assert_eq!(
            desired.repo_dir("peppymeter"),
            Path::new("/opt/peppy/screensaver/peppymeter")
        );
        assert_eq!(
            desired.icons_dir(),
            Path::new("/opt/peppy/screensaver/format-icons")
        );
        assert_eq!(desired.config_path(), Path::new("/opt/peppy/config.json"));
    }

    #[test]
    fn urls_point_at_raw_repository() {
        assert_eq!(
            DesiredState::remote_url(CLIENT_SCRIPT),
            format!("{RAW_BASE}/peppy_remote.py")
        );
        assert!(DesiredState::icon_url("flac").ends_with("format-icons/flac.svg"));
        assert!(DesiredState::font_url("DejaVuSans.ttf").contains("/fonts/"));
    }

    #[test]
    fn full_icon_set_covers_every_format() {
        let literal = full_icon_set_literal();
        for icon in FORMAT_ICONS {
            assert!(literal.contains(&format!("'{icon}'")), "missing {icon}");
        }
    }

    #[test]
    fn handler_patch_rules_are_idempotent_by_construction() {
        let rules = handler_patch_rules();

        // The replacement must not contain either stock pattern, otherwise
        // a second pass would rewrite again.
        for rule in &rules {
            assert!(!rule.replacement.contains(&rule.pattern));
        }

        let input = format!("x\n{}\ny\n", STOCK_ICON_SETS[0]);
        let (once, modified) = apply_rules(&input, &rules);
        assert!(modified);
        let (twice, modified_again) = apply_rules(&once, &rules);
        assert!(!modified_again);
        assert_eq!(once, twice);
    }
}
