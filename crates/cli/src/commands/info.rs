use std::path::Path;

use color_eyre::owo_colors::OwoColorize;

use crate::{config::Config, output::OutputBuilder};

fn format_path<P: AsRef<Path>>(path: Option<P>) -> String {
    match path {
        None => "<none>".red().to_string(),
        Some(path) => path.as_ref().to_string_lossy().to_string(),
    }
}

fn format_status(status: bool) -> String {
    if status {
        "Found".green().to_string()
    } else {
        "Not found".red().to_string()
    }
}

pub fn info(config: Config) -> color_eyre::Result<()> {
    let mut output = OutputBuilder::new("Peacock launcher");
    let options_dir = config.options_dir();

    output.property("Version", env!("CARGO_PKG_VERSION"));
    output.property("Launcher folder", format_path(config.known_dirs.exe_dir()));
    output.property("Config folder", format_path(config.config_dir()));
    output.property("Logs folder", format_path(config.log_dir()));

    let Some(options_dir) = options_dir else {
        print!("{}", output.build());
        return Ok(());
    };

    output.section("options.json", |builder| {
        builder.property("Path", options_dir.options_path().to_string_lossy());
        builder.property("Status", format_status(options_dir.is_initialized()));

        if !options_dir.is_initialized() {
            return;
        }

        match options_dir.load() {
            Ok(options) => {
                builder.property("PeacockFolder", &options.peacock_folder);
                builder.property("ServerWindowTitle", &options.server_window_title);
                builder.property("EpicUri", &options.epic_uri);
                builder.property("CloseDelaySeconds", options.close_delay_seconds);

                let patcher = options.patcher_path();
                builder.property(
                    "Patcher",
                    format!("{} ({})", patcher.display(), format_status(patcher.is_file())),
                );

                let server = options.server_cmd_path();
                builder.property(
                    "Server script",
                    format!("{} ({})", server.display(), format_status(server.is_file())),
                );
            }
            Err(error) => builder.property("Error", error.red()),
        }
    });

    print!("{}", output.build());

    Ok(())
}
