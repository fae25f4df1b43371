use safety_reorg::{Plan, phases};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const MAIN_SYSTEM: &str = "\
import os
from camera_module import CameraModule
from alarm_module import AlarmPlayer

BASE_DIR = os.path.dirname(os.path.abspath(__file__))
AUDIO_DIR = os.path.join(BASE_DIR, \"audio\")
";

fn build_project(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(root)?;
    fs::write(root.join("main_system.py"), MAIN_SYSTEM)?;
    fs::write(root.join("camera_module.py"), "class CameraModule: pass\n")?;
    fs::write(
        root.join("face_recognition_module.py"),
        "class FaceRecognizer: pass\n",
    )?;
    fs::write(root.join("alarm_module.py"), "class AlarmPlayer: pass\n")?;
    fs::write(root.join("device_auth.py"), "class DeviceAuth: pass\n")?;
    fs::create_dir_all(root.join("models"))?;
    fs::write(root.join("models/net.cfg"), "[net]\nwidth=416\n")?;
    fs::create_dir_all(root.join("audio"))?;
    fs::write(root.join("audio/alarm.wav"), "RIFF")?;
    fs::write(root.join("sync_integrator.py"), "# superseded\n")?;
    fs::create_dir_all(root.join("expresiones_faciales"))?;
    Ok(())
}

fn backups_next_to(root: &Path) -> Vec<PathBuf> {
    let parent = root.parent().unwrap();
    let mut found: Vec<PathBuf> = fs::read_dir(parent)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with("safety_system_backup_"))
                .unwrap_or(false)
        })
        .collect();
    found.sort();
    found
}

#[test]
fn reorganizes_a_realistic_project_tree() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let root = outer.path().join("safety_system");
    build_project(&root)?;

    let plan = Plan::safety_system();
    let report = phases::run(&plan, &root)?;

    assert!(
        !report.log.has_errors(),
        "clean tree must run clean: {:?}",
        report.log.errors()
    );

    // Root files landed in their packages.
    assert!(root.join("core/camera_module.py").exists());
    assert!(root.join("core/face_recognition_module.py").exists());
    assert!(root.join("core/alarm_module.py").exists());
    assert!(root.join("sync/device_auth.py").exists());
    assert!(!root.join("camera_module.py").exists());
    assert!(!root.join("device_auth.py").exists());

    // Resource trees merged into assets/ and the old roots are gone.
    assert_eq!(
        fs::read_to_string(root.join("assets/models/net.cfg"))?,
        "[net]\nwidth=416\n"
    );
    assert!(root.join("assets/audio/alarm.wav").exists());
    assert!(!root.join("models").exists());
    assert!(!root.join("audio").exists());

    // Imports and path literals rewritten in place.
    let main_system = fs::read_to_string(root.join("main_system.py"))?;
    assert!(main_system.contains("from core.camera_module import CameraModule"));
    assert!(main_system.contains("from core.alarm_module import AlarmPlayer"));
    assert!(main_system.contains("AUDIO_DIR = os.path.join(BASE_DIR, \"assets/audio\")"));

    // Obsolete entries removed.
    assert!(!root.join("sync_integrator.py").exists());
    assert!(!root.join("expresiones_faciales").exists());

    // Every package got its marker.
    for package in ["core", "sync", "sync/wrappers", "scripts", "assets"] {
        let marker = root.join(package).join("__init__.py");
        assert_eq!(
            fs::read_to_string(&marker)?,
            "# -*- coding: utf-8 -*-\n",
            "bad marker in {package}"
        );
    }

    // The backup next door holds the pre-run tree.
    assert_eq!(backups_next_to(&root), [report.backup_dir.clone()]);
    assert_eq!(fs::read_to_string(report.backup_dir.join("main_system.py"))?, MAIN_SYSTEM);
    assert!(report.backup_dir.join("camera_module.py").exists());
    assert!(report.backup_dir.join("models/net.cfg").exists());
    assert!(!report.backup_dir.join("core").exists());

    // The report names what happened.
    let report_text = fs::read_to_string(root.join("reorganization_report.txt"))?;
    assert!(report_text.contains("  - camera_module.py -> core/"));
    assert!(report_text.contains("  - models/ -> assets/models/"));
    assert!(!report_text.contains("ERRORS ENCOUNTERED:"));
    Ok(())
}

#[test]
fn second_run_changes_nothing_but_backup_and_report() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let root = outer.path().join("safety_system");
    build_project(&root)?;

    let plan = Plan::safety_system();
    let first = phases::run(&plan, &root)?;
    assert!(!first.log.has_errors());
    let settled = fs::read_to_string(root.join("main_system.py"))?;

    // The backup name has second resolution; a same-second rerun would
    // collide with the first backup.
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let second = phases::run(&plan, &root)?;
    assert!(second.log.moves().is_empty(), "moves: {:?}", second.log.moves());
    assert!(!second.log.has_errors(), "errors: {:?}", second.log.errors());
    assert_ne!(second.backup_dir, first.backup_dir);
    assert_eq!(backups_next_to(&root).len(), 2);

    // The already-reorganized tree is untouched.
    assert_eq!(fs::read_to_string(root.join("main_system.py"))?, settled);
    assert!(root.join("core/camera_module.py").exists());
    assert!(!root.join("models").exists());

    // The fresh report names the fresh backup and no moves.
    let report_text = fs::read_to_string(root.join("reorganization_report.txt"))?;
    assert!(report_text.contains(&format!(
        "Backup created at: {}",
        second.backup_dir.display()
    )));
    assert!(!report_text.contains("camera_module.py -> core/"));
    Ok(())
}
