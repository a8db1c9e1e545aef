use crate::app::calculators::{autopartes, bateria, consumo, depreciacion, fallos, servicio, tips};
use crate::utils::logger::LogFormat;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::collections::HashMap;

#[derive(Debug, Clone, Parser)]
#[command(name = "autocalc")]
#[command(about = "Calculadora automotriz: servicio, consumo, batería, autopartes, depreciación y fallos")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API root, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Timezone used for calendar events
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Log format: compact or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List registered calculators
    Calculators,

    /// Show the form of a calculator
    Open { id: String },

    /// Next service estimate
    Servicio {
        #[arg(long, default_value = "")]
        current_km: String,
        #[arg(long, default_value = "")]
        last_service_km: String,
        #[arg(long, default_value = "")]
        interval_km: String,
        #[arg(long, default_value = "")]
        avg_km_month: String,
    },

    /// Fuel consumption and cost
    Consumo {
        #[arg(long, default_value = "")]
        distance: String,
        #[arg(long, default_value = "")]
        liters: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "mixto")]
        driving_type: String,
    },

    /// Battery life evaluation
    Bateria {
        /// Installation date, YYYY-MM-DD
        #[arg(long)]
        install: String,
        #[arg(long, default_value = "convencional")]
        battery_type: String,
        #[arg(long, default_value = "diario")]
        usage: String,
        #[arg(long, default_value = "templado")]
        climate: String,
    },

    /// Maintenance tips for a category
    Tips { category: String },

    /// Auto-parts search links
    Autopartes {
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        model: String,
        #[arg(long, default_value = "")]
        year: String,
        #[arg(long, default_value = "")]
        part_type: String,
    },

    /// Vehicle depreciation estimate
    Depreciacion {
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        year: String,
        #[arg(long, default_value = "")]
        km: String,
        #[arg(long, default_value = "bueno")]
        condition: String,
        #[arg(long, default_value = "japonesa")]
        brand_class: String,
    },

    /// Failure-risk projection for a part
    Fallos {
        #[arg(long, default_value = "aceite")]
        part: String,
        #[arg(long, default_value = "")]
        clima: String,
        #[arg(long, default_value = "")]
        current_km: String,
        #[arg(long, default_value = "")]
        last_km: String,
        #[arg(long, default_value = "")]
        interval_km: String,
        #[arg(long, default_value = "")]
        months: String,
        #[arg(long, default_value = "")]
        interval_months: String,
        #[arg(long, default_value = "")]
        horizon_km: String,
        #[arg(long, default_value = "")]
        points: String,
        /// Schedule a reminder 48 hours from now after a successful projection
        #[arg(long)]
        agendar: bool,
        /// Write the risk curve as CSV under the export directory
        #[arg(long)]
        export_csv: Option<String>,
    },

    /// Create a calendar reminder
    Agendar {
        #[arg(long)]
        summary: String,
        #[arg(long)]
        description: Option<String>,
        /// Start, RFC 3339 or local YYYY-MM-DDTHH:MM[:SS]
        #[arg(long, value_parser = parse_instant)]
        start: DateTime<Utc>,
        /// End; defaults to one hour after start
        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        reminder_minutes: Option<i64>,
    },
}

fn form<V: AsRef<str>>(pairs: &[(&str, V)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.as_ref().to_string()))
        .collect()
}

impl Command {
    /// Calculator id and raw form values for calculator subcommands.
    pub fn form_values(&self) -> Option<(&'static str, HashMap<String, String>)> {
        let values = match self {
            Command::Servicio {
                current_km,
                last_service_km,
                interval_km,
                avg_km_month,
            } => (
                servicio::ID,
                form(&[
                    (servicio::IN_CURRENT_KM, current_km),
                    (servicio::IN_LAST_SERVICE_KM, last_service_km),
                    (servicio::IN_INTERVAL_KM, interval_km),
                    (servicio::IN_AVG_KM_MONTH, avg_km_month),
                ]),
            ),
            Command::Consumo {
                distance,
                liters,
                price,
                driving_type,
            } => (
                consumo::ID,
                form(&[
                    (consumo::IN_DISTANCE, distance),
                    (consumo::IN_LITERS, liters),
                    (consumo::IN_PRICE, price),
                    (consumo::IN_DRIVING_TYPE, driving_type),
                ]),
            ),
            Command::Bateria {
                install,
                battery_type,
                usage,
                climate,
            } => (
                bateria::ID,
                form(&[
                    (bateria::IN_INSTALL, install),
                    (bateria::IN_TYPE, battery_type),
                    (bateria::IN_USAGE, usage),
                    (bateria::IN_CLIMATE, climate),
                ]),
            ),
            Command::Tips { category } => (tips::ID, form(&[(tips::IN_CATEGORY, category)])),
            Command::Autopartes {
                brand,
                model,
                year,
                part_type,
            } => (
                autopartes::ID,
                form(&[
                    (autopartes::IN_BRAND, brand),
                    (autopartes::IN_MODEL, model),
                    (autopartes::IN_YEAR, year),
                    (autopartes::IN_TYPE, part_type),
                ]),
            ),
            Command::Depreciacion {
                price,
                year,
                km,
                condition,
                brand_class,
            } => (
                depreciacion::ID,
                form(&[
                    (depreciacion::IN_PRICE, price),
                    (depreciacion::IN_YEAR, year),
                    (depreciacion::IN_KM, km),
                    (depreciacion::IN_CONDITION, condition),
                    (depreciacion::IN_BRAND, brand_class),
                ]),
            ),
            Command::Fallos {
                part,
                clima,
                current_km,
                last_km,
                interval_km,
                months,
                interval_months,
                horizon_km,
                points,
                ..
            } => (
                fallos::ID,
                form(&[
                    (fallos::IN_PART, part),
                    (fallos::IN_CLIMA, clima),
                    (fallos::IN_CURRENT_KM, current_km),
                    (fallos::IN_LAST_KM, last_km),
                    (fallos::IN_INTERVAL_KM, interval_km),
                    (fallos::IN_MONTHS, months),
                    (fallos::IN_INTERVAL_MONTHS, interval_months),
                    (fallos::IN_HORIZON_KM, horizon_km),
                    (fallos::IN_POINTS, points),
                ]),
            ),
            Command::Calculators | Command::Open { .. } | Command::Agendar { .. } => return None,
        };
        Some(values)
    }
}

/// RFC 3339, or a naive local date-time with or without seconds.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("invalid date-time '{}': {}", raw, e))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in the local timezone", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_instant_accepts_rfc3339() {
        let t = parse_instant("2025-11-05T10:00:00-06:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2025-11-05T16:00:00+00:00");
        assert!(parse_instant("2025-11-05T10:00").is_ok());
        assert!(parse_instant("mañana").is_err());
    }

    #[test]
    fn servicio_args_map_to_form_ids() {
        let cli = CliConfig::parse_from([
            "autocalc",
            "servicio",
            "--current-km",
            "52000",
            "--interval-km",
            "10000",
        ]);
        let (id, values) = cli.command.form_values().unwrap();
        assert_eq!(id, servicio::ID);
        assert_eq!(values[servicio::IN_CURRENT_KM], "52000");
        assert_eq!(values[servicio::IN_LAST_SERVICE_KM], "");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = CliConfig::parse_from([
            "autocalc",
            "tips",
            "seguridad",
            "--api-base",
            "http://127.0.0.1:9000/api",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:9000/api"));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Command::Tips { .. }));
    }
}
