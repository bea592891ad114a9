//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `composer_core` linkage and print the default document order.
//! - Optionally export the previewed default document into a directory.
//!
//! Usage: `composer_cli [OUTPUT_DIR]`

use composer_core::{
    init_logging_with_config, ComposerConfig, ComposerEvent, ExportBridge, SectionId, Session,
    SnapshotFileWriter,
};
use futures_executor::block_on;
use std::path::PathBuf;
use std::process::ExitCode;

const SUMMARY_CHARS: usize = 60;

fn main() -> ExitCode {
    println!("composer_core ping={}", composer_core::ping());
    println!("composer_core version={}", composer_core::core_version());

    let config = ComposerConfig::default();
    let mut session = Session::with_default_template();
    if let (Ok(skills), Ok(header)) = (SectionId::new("skills"), SectionId::new("header")) {
        session.dispatch(ComposerEvent::DragCommitted {
            source: Some(skills),
            over: Some(header),
        });
    }
    session.dispatch(ComposerEvent::ModeToggled);

    for (index, section) in session.view().sections.iter().enumerate() {
        println!(
            "{index} {} {} | {}",
            section.style.icon,
            section.title,
            section.summary(SUMMARY_CHARS)
        );
    }

    let Some(output_dir) = std::env::args().nth(1).map(PathBuf::from) else {
        return ExitCode::SUCCESS;
    };
    if output_dir.is_absolute() {
        let log_dir = output_dir.join("logs");
        if let Err(err) = init_logging_with_config(&config, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let writer = SnapshotFileWriter::new(output_dir);
    let target = writer.output_path(&config.export);
    let bridge = match ExportBridge::new(writer, config.export.clone()) {
        Ok(bridge) => bridge,
        Err(err) => {
            eprintln!("invalid export options: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = block_on(session.export(&bridge));
    let notice = result.notice(&config.export.destination_name);
    if result.is_success() {
        println!("{} ({})", notice.message, target.display());
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", notice.message);
        ExitCode::FAILURE
    }
}
