//! The fixed reorganization plan.
//! Every table the tool acts on is declared here. Nothing is read from
//! config files, and no CLI flag changes these values.

use std::path::PathBuf;

/// File that must exist in the working directory before anything runs.
pub const MARKER_FILE: &str = "main_system.py";

/// Report written into the project root at the end of every run.
pub const REPORT_FILE: &str = "reorganization_report.txt";

/// Prefix of the timestamped backup directory created next to the project.
pub const BACKUP_PREFIX: &str = "safety_system_backup";

/// Marker file dropped into each new Python package directory.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Content of the package marker file.
pub const PACKAGE_MARKER_CONTENT: &str = "# -*- coding: utf-8 -*-\n";

const LAYOUT_DIAGRAM: &str = "
safety_system/
├── core/                    # Detection modules
├── sync/                    # Synchronization system
│   └── wrappers/           # Wrappers for synchronization
├── config/                  # Configuration (unchanged)
├── client/                  # Sync client (unchanged)
├── server/                  # PHP dashboard (unchanged)
├── scripts/                 # Auxiliary scripts
├── assets/                  # Static resources
│   ├── audio/
│   ├── models/
│   └── operators/
├── output/                  # Runtime output
│   ├── reports/
│   └── logs/
├── main_system.py          # Main system
└── main_system_wrapper.py  # System with synchronization
";

/// What a relocation entry moves: named files from the project root, or one
/// whole directory merged into the destination.
#[derive(Debug, Clone)]
pub enum MoveSource {
    Files(Vec<String>),
    Tree(String),
}

/// One destination directory and the material that lands in it.
#[derive(Debug, Clone)]
pub struct RelocationEntry {
    /// Destination directory, relative to the project root.
    pub dest: PathBuf,
    pub source: MoveSource,
}

impl RelocationEntry {
    pub fn files(dest: &str, names: &[&str]) -> Self {
        Self {
            dest: PathBuf::from(dest),
            source: MoveSource::Files(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    pub fn tree(dest: &str, src: &str) -> Self {
        Self {
            dest: PathBuf::from(dest),
            source: MoveSource::Tree(src.to_string()),
        }
    }
}

/// Ordered literal substitutions applied to one file.
/// Matching is plain substring replacement; declaration order matters.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Target file, relative to the project root (post-move location).
    pub file: PathBuf,
    pub substitutions: Vec<(String, String)>,
}

impl RewriteRule {
    pub fn new(file: &str, substitutions: Vec<(String, String)>) -> Self {
        Self {
            file: PathBuf::from(file),
            substitutions,
        }
    }
}

/// Obsolete entries removed near the end of a run.
/// Directories are only removed when a listing reports them empty.
#[derive(Debug, Clone, Default)]
pub struct DeletionSet {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

/// The complete, hard-coded description of one reorganization.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Precondition file checked before the prompt.
    pub marker_file: PathBuf,
    pub backup_prefix: String,
    /// Base-name patterns excluded from the backup (`*`-prefix = suffix match).
    pub backup_ignore: Vec<String>,
    /// Directories created in phase 2, in order.
    pub target_dirs: Vec<PathBuf>,
    pub relocations: Vec<RelocationEntry>,
    pub import_rewrites: Vec<RewriteRule>,
    pub path_rewrites: Vec<RewriteRule>,
    pub deletions: DeletionSet,
    /// Directories that receive a package marker file.
    pub package_dirs: Vec<PathBuf>,
    pub report_file: PathBuf,
    /// Fixed tree diagram appended to the report.
    pub layout_diagram: String,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            marker_file: PathBuf::from(MARKER_FILE),
            backup_prefix: BACKUP_PREFIX.to_string(),
            backup_ignore: Vec::new(),
            target_dirs: Vec::new(),
            relocations: Vec::new(),
            import_rewrites: Vec::new(),
            path_rewrites: Vec::new(),
            deletions: DeletionSet::default(),
            package_dirs: Vec::new(),
            report_file: PathBuf::from(REPORT_FILE),
            layout_diagram: String::new(),
        }
    }
}

impl Plan {
    /// The safety-system reorganization this tool exists for.
    pub fn safety_system() -> Self {
        let target_dirs = [
            "core",
            "sync",
            "sync/wrappers",
            "scripts",
            "assets",
            "assets/audio",
            "assets/models",
            "assets/operators",
            "output",
            "output/reports",
            "output/logs",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let relocations = vec![
            RelocationEntry::files(
                "core",
                &[
                    "camera_module.py",
                    "face_recognition_module.py",
                    "fatigue_detection.py",
                    "bostezo_detection.py",
                    "distraction_detection.py",
                    "behavior_detection_module.py",
                    "alarm_module.py",
                    "report_generator.py",
                ],
            ),
            RelocationEntry::files(
                "sync",
                &[
                    "config_sync_client.py",
                    "device_auth.py",
                    "heartbeat_sender.py",
                ],
            ),
            RelocationEntry::files(
                "sync/wrappers",
                &[
                    "behavior_detection_wrapper.py",
                    "fatigue_detection_wrapper.py",
                    "face_recognition_wrapper.py",
                ],
            ),
            RelocationEntry::files("scripts", &["register_operator.py", "process_photos.py"]),
            RelocationEntry::tree("assets/audio", "audio"),
            RelocationEntry::tree("assets/models", "models"),
            RelocationEntry::tree("assets/operators", "operators"),
            RelocationEntry::tree("output/reports", "reports"),
            RelocationEntry::tree("output/logs", "logs"),
        ];

        let import_rewrites = vec![
            RewriteRule::new(
                "main_system.py",
                [
                    "camera_module",
                    "face_recognition_module",
                    "fatigue_detection",
                    "bostezo_detection",
                    "distraction_detection",
                    "alarm_module",
                    "behavior_detection_module",
                ]
                .iter()
                .map(|m| import_shift(m, "core"))
                .collect(),
            ),
            RewriteRule::new(
                "main_system_wrapper.py",
                [
                    "behavior_detection_wrapper",
                    "fatigue_detection_wrapper",
                    "face_recognition_wrapper",
                ]
                .iter()
                .map(|m| import_shift(m, "sync.wrappers"))
                .collect(),
            ),
            RewriteRule::new(
                "sync/wrappers/behavior_detection_wrapper.py",
                vec![import_shift("behavior_detection_module", "core")],
            ),
            RewriteRule::new(
                "sync/wrappers/fatigue_detection_wrapper.py",
                vec![import_shift("fatigue_detection", "core")],
            ),
            // This wrapper imported the bare library name; it must point at
            // the relocated module, not a package of the same name.
            RewriteRule::new(
                "sync/wrappers/face_recognition_wrapper.py",
                vec![(
                    "from face_recognition import".to_string(),
                    "from core.face_recognition_module import".to_string(),
                )],
            ),
        ];

        let path_rewrites = [
            "main_system.py",
            "core/face_recognition_module.py",
            "core/behavior_detection_module.py",
            "scripts/register_operator.py",
            "scripts/process_photos.py",
        ]
        .iter()
        .map(|f| RewriteRule::new(f, path_substitutions()))
        .collect();

        let deletions = DeletionSet {
            files: [
                "fatigue_adapter.py",
                "behavior_adapter.py",
                "face_recognition_adapter.py",
                "sync_integrator.py",
                "main_with_sync.py",
                "cp_errordocument.shtml",
                "SYNC_INTEGRATION_GUIDE.md",
                "setup_sync.sh",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            dirs: vec![PathBuf::from("expresiones_faciales")],
        };

        let package_dirs = ["core", "sync", "sync/wrappers", "scripts", "assets"]
            .iter()
            .map(PathBuf::from)
            .collect();

        Self {
            marker_file: PathBuf::from(MARKER_FILE),
            backup_prefix: BACKUP_PREFIX.to_string(),
            backup_ignore: ["*.pyc", "__pycache__", ".git", "venv", "*.log", ".DS_Store"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            target_dirs,
            relocations,
            import_rewrites,
            path_rewrites,
            deletions,
            package_dirs,
            report_file: PathBuf::from(REPORT_FILE),
            layout_diagram: LAYOUT_DIAGRAM.to_string(),
        }
    }
}

fn import_shift(module: &str, package: &str) -> (String, String) {
    (
        format!("from {module} import"),
        format!("from {package}.{module} import"),
    )
}

/// Shared substitution list for the path-literal pass. The quoted-literal
/// rules come first and normally consume the match; the whole-statement
/// rules stay behind them in their original declared order.
fn path_substitutions() -> Vec<(String, String)> {
    let mut subs = Vec::new();
    for (old, new) in [
        ("operators", "assets/operators"),
        ("models", "assets/models"),
        ("audio", "assets/audio"),
        ("reports", "output/reports"),
        ("logs", "output/logs"),
    ] {
        subs.push((format!("\"{old}\""), format!("\"{new}\"")));
        subs.push((format!("'{old}'"), format!("'{new}'")));
    }
    for (var, old, new) in [
        ("OPERATORS_DIR", "operators", "assets/operators"),
        ("MODEL_DIR", "models", "assets/models"),
        ("AUDIO_DIR", "audio", "assets/audio"),
        ("REPORTS_DIR", "reports", "output/reports"),
        ("LOGS_DIR", "logs", "output/logs"),
    ] {
        subs.push((
            format!("{var} = os.path.join(BASE_DIR, \"{old}\")"),
            format!("{var} = os.path.join(BASE_DIR, \"{new}\")"),
        ));
    }
    subs
}
