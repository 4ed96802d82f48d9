use std::path::{Path, PathBuf};

use clap::ArgMatches;
use tracing::{error, info};

use tabfloater_core::TabfloaterError;
use tabfloater_core::install::{
    self, Browser, ExtensionId, InstallRequest, LAUNCHER_FILE_NAME, UninstallRequest,
    host_executable_name,
};

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.startup_completed", version = env!("CARGO_PKG_VERSION"));

    match matches.subcommand() {
        Some(("install", sub_matches)) => handle_install_command(sub_matches),
        Some(("uninstall", sub_matches)) => handle_uninstall_command(sub_matches),
        Some(("manifest", sub_matches)) => handle_manifest_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// `--host-path`, or the host executable beside this program.
fn host_path(matches: &ArgMatches) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = matches.get_one::<String>("host-path") {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or("Cannot determine the directory of this program")?;
    Ok(dir.join(host_executable_name()))
}

fn browser(matches: &ArgMatches) -> Result<Browser, Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("browser")
        .map(String::as_str)
        .unwrap_or("chrome");
    Ok(Browser::parse(name)?)
}

fn extension_id(matches: &ArgMatches) -> Result<ExtensionId, Box<dyn std::error::Error>> {
    let raw = matches
        .get_one::<String>("extension-id")
        .ok_or("Extension id argument is required")?;
    ExtensionId::parse(raw).map_err(|e| -> Box<dyn std::error::Error> {
        eprintln!("❌ {}", e);
        error!(event = "cli.extension_id_invalid", error = %e, error_code = e.error_code());
        e.into()
    })
}

fn handle_install_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let request = InstallRequest {
        extension_id: extension_id(matches)?,
        browser: browser(matches)?,
        host_path: host_path(matches)?,
        manifest_dir: matches.get_one::<String>("manifest-dir").map(PathBuf::from),
        register: !matches.get_flag("no-register"),
    };

    info!(
        event = "cli.install_started",
        browser = %request.browser,
        host_path = %request.host_path.display()
    );

    match install::install(&request) {
        Ok(report) => {
            println!("✅ TabFloater companion installed for {}", request.browser);
            println!("   Launcher: {}", report.launcher_path.display());
            println!("   Manifest: {}", report.manifest_path.display());
            if let Some(key) = &report.registry_key {
                println!("   Registry: HKEY_CURRENT_USER\\{}", key);
            }

            info!(event = "cli.install_completed", browser = %request.browser);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to install TabFloater companion: {}", e);

            error!(
                event = "cli.install_failed",
                error = %e,
                error_code = e.error_code()
            );

            Err(e.into())
        }
    }
}

fn handle_uninstall_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let request = UninstallRequest {
        browser: browser(matches)?,
        host_path: host_path(matches)?,
        manifest_dir: matches.get_one::<String>("manifest-dir").map(PathBuf::from),
        unregister: !matches.get_flag("no-register"),
    };

    info!(event = "cli.uninstall_started", browser = %request.browser);

    match install::uninstall(&request) {
        Ok(report) => {
            println!("✅ TabFloater companion removed for {}", request.browser);
            print_removed("Launcher", report.launcher_path.as_deref());
            print_removed("Manifest", report.manifest_path.as_deref());
            if let Some(key) = &report.registry_key {
                println!("   Registry: HKEY_CURRENT_USER\\{}", key);
            }

            info!(
                event = "cli.uninstall_completed",
                browser = %request.browser,
                removed_manifest = report.manifest_path.is_some()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to uninstall TabFloater companion: {}", e);

            error!(
                event = "cli.uninstall_failed",
                error = %e,
                error_code = e.error_code()
            );

            Err(e.into())
        }
    }
}

fn print_removed(label: &str, path: Option<&Path>) {
    match path {
        Some(path) => println!("   {}: {}", label, path.display()),
        None => println!("   {}: not present", label),
    }
}

fn handle_manifest_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let extension_id = extension_id(matches)?;
    let host_path = std::path::absolute(host_path(matches)?)?;
    let launcher_path = host_path
        .parent()
        .map(|dir| dir.join(LAUNCHER_FILE_NAME))
        .ok_or("Host path has no parent directory")?;

    let manifest = install::build_manifest(&extension_id, &launcher_path);
    println!("{}", install::manifest_to_json(&manifest)?);

    info!(event = "cli.manifest_completed", launcher = %launcher_path.display());
    Ok(())
}
