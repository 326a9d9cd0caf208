use crate::cli::args::{Args, Command, ConfigArgs, ConfigCommand, ShowArgs, TuiArgs};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::filter::FilterState;
use crate::core::router::FocusRouter;
use crate::core::table::TableModel;
use crate::domain::config::RowdeskConfig;
use crate::domain::error::{RowdeskError, RowdeskResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::{init_logging, LogTarget};
use crate::infrastructure::records::load_records;
use crate::tui::app::App;
use crate::tui::widgets::styles::Palette;
use std::path::Path;
use std::time::Duration;

/// Execute CLI command
pub async fn execute_command(args: Args) -> RowdeskResult<()> {
    let writer = ConsoleWriter::new(args.output.clone());

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path)?
    } else {
        config_manager.load_config()?
    };

    match args.command.unwrap_or(Command::Tui(TuiArgs::default())) {
        Command::Tui(tui_args) => {
            config.validate()?;
            if !args.quiet {
                let log_dir = match &config.global.log_dir {
                    Some(dir) => dir.clone(),
                    None => ConfigManager::default_log_dir()?,
                };
                let target = LogTarget::File {
                    dir: log_dir,
                    max_files: config.global.log_max_files,
                };
                init_logging(target, &config.global.log_level, args.verbose)?;
            }
            run_tui(&config, tui_args).await
        }
        Command::Show(show_args) => {
            config.validate()?;
            if !args.quiet {
                init_logging(LogTarget::Stderr, &config.global.log_level, args.verbose)?;
            }
            execute_show_command(show_args, &writer, &config)
        }
        Command::Config(config_args) => {
            execute_config_command(config_args, &writer, &config, &config_manager)
        }
        Command::Version => {
            writer.write_message(&format!("rowdesk {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// Load the configured (or overridden) CSV into a table model
pub fn load_table(config: &RowdeskConfig, data: Option<&Path>) -> RowdeskResult<TableModel> {
    let path = data.unwrap_or(config.data.path.as_path());
    let columns = config.data.columns.clone();
    let records = load_records(path, config.data.delimiter_byte()?, &columns)?;
    TableModel::new(columns, records)
}

async fn run_tui(config: &RowdeskConfig, args: TuiArgs) -> RowdeskResult<()> {
    let table = load_table(config, args.data.as_deref())?;
    let router = FocusRouter::new(
        table,
        &config.editor.fields,
        config.keys.clone(),
        config.ui.status_height,
    )?;

    tracing::info!(
        rows = router.table().row_count(),
        columns = router.table().columns().len(),
        "starting interactive session"
    );

    let mut app = App::new(
        router,
        Palette::new(config.ui.mask_char),
        Duration::from_millis(config.ui.blink_interval_ms),
    )?;
    app.run().await
}

/// Apply the listing options to a loaded table
pub fn apply_show_options(table: &mut TableModel, args: &ShowArgs) -> RowdeskResult<()> {
    if let (Some(column), Some(text)) = (&args.filter_column, &args.filter) {
        let index = column_index(table, column)?;
        table.set_filter(FilterState::new(index, text.as_str()).as_ref());
    }

    if let Some(column) = &args.sort {
        let index = column_index(table, column)?;
        table.toggle_sort(index);
        if args.desc {
            table.toggle_sort(index);
        }
    }

    Ok(())
}

fn column_index(table: &TableModel, name: &str) -> RowdeskResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| RowdeskError::InvalidInput(format!("Unknown column '{}'", name)))
}

fn execute_show_command(args: ShowArgs, writer: &ConsoleWriter, config: &RowdeskConfig) -> RowdeskResult<()> {
    let mut table = load_table(config, args.data.as_deref())?;
    apply_show_options(&mut table, &args)?;
    writer.write_records(&table)?;
    Ok(())
}

fn execute_config_command(
    args: ConfigArgs,
    writer: &ConsoleWriter,
    config: &RowdeskConfig,
    config_manager: &ConfigManager,
) -> RowdeskResult<()> {
    match args.command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let loaded = match &file {
                Some(config_path) => config_manager.load_config_from_path(config_path),
                None => Ok(config.clone()),
            };
            let label = file
                .as_ref()
                .map(|p| format!("Configuration file '{}'", p.display()))
                .unwrap_or_else(|| "Current configuration".to_string());

            match loaded.and_then(|c| c.validate()) {
                Ok(()) => {
                    writer.write_message(&format!("{} is valid", label))?;
                    Ok(())
                }
                Err(e) => {
                    writer.write_error(&format!("Configuration validation failed: {}", e))?;
                    Err(e)
                }
            }
        }
        ConfigCommand::Init { dir, global } => {
            if global {
                let global_path = config_manager.get_global_config_path_ref();
                config_manager.save_config_to_path(global_path, &RowdeskConfig::default())?;
                writer.write_message(&format!("Global configuration initialized at '{}'", global_path.display()))?;
            } else {
                let dir = match dir {
                    Some(dir) => dir,
                    None => std::env::current_dir().map_err(|e| RowdeskError::Config {
                        message: format!("Failed to get current directory: {}", e),
                    })?,
                };
                let path = config_manager.init_project_config(&dir)?;
                writer.write_message(&format!("Project configuration initialized at '{}'", path.display()))?;
            }
            Ok(())
        }
    }
}
