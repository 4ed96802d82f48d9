use clap::{Arg, ArgAction, Command};

fn browser_arg() -> Arg {
    Arg::new("browser")
        .long("browser")
        .short('b')
        .help("Browser to register with")
        .value_parser(["chrome", "chromium", "edge"])
        .default_value("chrome")
}

fn host_path_arg() -> Arg {
    Arg::new("host-path")
        .long("host-path")
        .help("Path to the tabfloater-host executable (default: beside this program)")
}

fn manifest_dir_arg() -> Arg {
    Arg::new("manifest-dir")
        .long("manifest-dir")
        .help("Directory for the manifest file (overrides the browser default)")
}

fn extension_id_arg() -> Arg {
    Arg::new("extension-id")
        .long("extension-id")
        .short('e')
        .help("ID of the TabFloater extension allowed to launch the host")
        .required(true)
}

pub fn build_cli() -> Command {
    Command::new("tabfloater")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Register the TabFloater companion host with the browser")
        .long_about("The TabFloater extension pins browser windows on top through a native messaging host. This tool writes the host manifest and launcher, and on Windows the registry key the browser uses to find them.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("install")
                .about("Write the manifest and launcher and register the host")
                .arg(extension_id_arg())
                .arg(browser_arg())
                .arg(host_path_arg())
                .arg(manifest_dir_arg())
                .arg(
                    Arg::new("no-register")
                        .long("no-register")
                        .help("Skip the registry key (Windows)")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("uninstall")
                .about("Remove the manifest, launcher and registry key")
                .arg(browser_arg())
                .arg(host_path_arg())
                .arg(manifest_dir_arg())
                .arg(
                    Arg::new("no-register")
                        .long("no-register")
                        .help("Leave the registry key in place (Windows)")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("manifest")
                .about("Print the host manifest without writing anything")
                .arg(extension_id_arg())
                .arg(host_path_arg())
        )
}
