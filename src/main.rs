use autocalc::config::{self, Command};
use autocalc::core::calendar::{self, CalendarRequest};
use autocalc::domain::ports::ConfigProvider;
use autocalc::utils::error::ErrorSeverity;
use autocalc::utils::{logger, validation::Validate};
use autocalc::{CalcContext, CalcError, CalculatorRegistry, CliConfig, LocalStorage, MemoryView};
use clap::Parser;

fn exit_code(e: &CalcError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &CalcError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e).max(1));
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match config::load_effective(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    logger::init_cli_logger(settings.logging.verbose, settings.log_format());
    tracing::debug!("Effective configuration: {:?}", settings);

    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let ctx = CalcContext::from_config(&settings);
    let mut view = MemoryView::page();
    let (registry, projection) = CalculatorRegistry::with_defaults(&mut view);
    tracing::info!("Using API at {}", ctx.client.base_url());

    let outcome: Result<(), CalcError> = match &cli.command {
        Command::Calculators => {
            for calc in registry.iter() {
                println!("{:<14} {}", calc.id(), calc.title());
            }
            return;
        }
        Command::Open { id } => {
            if registry.open(id, &mut view) {
                Ok(())
            } else {
                Err(CalcError::UnknownCalculator { id: id.clone() })
            }
        }
        Command::Agendar {
            summary,
            description,
            start,
            end,
            reminder_minutes,
        } => {
            let request = CalendarRequest {
                summary: summary.clone(),
                description: description.clone(),
                start: *start,
                end: end.unwrap_or(*start + chrono::Duration::hours(1)),
                timezone: None,
                reminder_minutes: *reminder_minutes,
            };
            let response = calendar::schedule(&ctx.client, &ctx.calendar, &request, &mut view).await;
            tracing::debug!("Calendar response: {:?}", response);
            Ok(())
        }
        command => match command.form_values() {
            Some((id, form)) => {
                let result = registry.submit(id, &ctx, &form, &mut view).await;
                match (result, command) {
                    (
                        Ok(()),
                        Command::Fallos {
                            agendar,
                            export_csv,
                            ..
                        },
                    ) => {
                        let mut post = Ok(());
                        if let Some(file) = export_csv {
                            let storage = LocalStorage::new(settings.output_path());
                            post = projection.export_curve(&storage, file).await.map(|rows| {
                                println!(
                                    "📁 {} puntos exportados a {}",
                                    rows,
                                    storage.full_path(file).display()
                                );
                            });
                        }
                        if *agendar {
                            projection
                                .schedule_reminder(&ctx, &mut view, chrono::Utc::now())
                                .await;
                        }
                        post
                    }
                    (result, _) => result,
                }
            }
            None => Ok(()),
        },
    };

    print!("{}", view.render());

    if let Err(e) = outcome {
        // Request failures were already shown in the view.
        if !matches!(
            e,
            CalcError::Api { .. } | CalcError::Transport(_) | CalcError::Decode { .. }
        ) {
            eprintln!("❌ {}", e.user_friendly_message());
        }
        eprintln!("💡 {}", e.recovery_suggestion());
        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }
}
