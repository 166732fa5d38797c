use super::command::Command;
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg};
use log::{error, info};
use std::{ffi::OsString, str::FromStr, sync::Once, time::SystemTime};

static LOGGER_INIT: Once = Once::new();

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

/// The structure handling the set of commands and dispatching the CLI arguments to the
/// right one.
///
/// Create a helper, add the app commands, then call [`launch_app`](Self::launch_app): it
/// initializes the logger, reads the CLI arguments and executes the matching command. If
/// the command returns an error, the error chain is displayed and the process exits with
/// a status of 1.
pub(crate) struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub fn new(app_name: &'a str, version: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    /// Launches the application, reading the command line arguments through
    /// `std::env::args_os()`. This function consumes the helper.
    pub fn launch_app(self) {
        if let Err(e) = self.execute_app(std::env::args_os()) {
            error!("an error occurred: {}", e);
            e.chain()
                .skip(1)
                .for_each(|err| error!("caused by: {}", err));
            std::process::exit(1);
        }
    }

    fn execute_app<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let start_time = SystemTime::now();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        match app.get_matches_from_safe(args) {
            Ok(matches) => {
                for c in self.commands.iter() {
                    if let Some(command_matches) = matches.subcommand_matches(c.name()) {
                        let str_level = command_matches
                            .value_of(ARG_LOGGING_LEVEL)
                            .unwrap_or("info");
                        init_logger_with_level(log::LevelFilter::from_str(str_level).unwrap());
                        info!("{} {}", self.app_name, self.version);
                        let result = c.execute(command_matches);
                        if result.is_ok() {
                            info!(
                                "exiting successfully after {:?}",
                                start_time.elapsed().unwrap_or_default()
                            );
                        }
                        return result;
                    }
                }
                unreachable!()
            }
            Err(
                e @ clap::Error {
                    kind: clap::ErrorKind::HelpDisplayed,
                    ..
                },
            ) => {
                println!("{}", e.message);
                Ok(())
            }
            Err(e) => {
                init_logger_with_level(log::LevelFilter::Info);
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e.message))
            }
        }
    }
}

pub(crate) fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()
            .unwrap_or(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::SubCommand;

    struct LocalCommand;

    impl<'a> Command<'a> for LocalCommand {
        fn name(&self) -> &str {
            "local_command_name"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("local_command_name")
                .about("local_command_about")
                .arg(Arg::with_name("kill").short("k"))
        }

        fn execute(&self, arg_matches: &clap::ArgMatches<'_>) -> Result<()> {
            if arg_matches.is_present("kill") {
                Err(anyhow!("foo"))
            } else {
                Ok(())
            }
        }
    }

    fn app_helper() -> AppHelper<'static> {
        let mut h = AppHelper::new("app", "0.0.0", "about");
        h.add_command(Box::new(LocalCommand));
        h
    }

    #[test]
    fn test_no_subcommand() {
        app_helper().execute_app(vec!["app"]).unwrap_err();
    }

    #[test]
    fn test_subcommand_ok() {
        app_helper()
            .execute_app(vec!["app", "local_command_name"])
            .unwrap();
    }

    #[test]
    fn test_subcommand_err() {
        app_helper()
            .execute_app(vec!["app", "local_command_name", "-k"])
            .unwrap_err();
    }

    #[test]
    fn test_unknown_subcommand() {
        app_helper()
            .execute_app(vec!["app", "unknown_command"])
            .unwrap_err();
    }
}
