//! Calculators: each reads its form, calls one endpoint and renders the result.

pub mod autopartes;
pub mod bateria;
pub mod consumo;
pub mod depreciacion;
pub mod fallos;
pub mod servicio;
pub mod tips;

use crate::core::calendar::CalendarDefaults;
use crate::core::client::ApiClient;
use crate::core::format::NumberFormat;
use crate::domain::ports::{ConfigProvider, FormSource, View};
use crate::domain::view::{FormSpec, Node};
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;

pub const MODAL: &str = "calculatorModal";
pub const MODAL_TITLE: &str = "modalTitle";
pub const MODAL_CONTENT: &str = "modalContent";

/// Everything a submission needs besides its form and view.
#[derive(Debug, Clone)]
pub struct CalcContext {
    pub client: ApiClient,
    pub format: NumberFormat,
    pub calendar: CalendarDefaults,
}

impl CalcContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            format: NumberFormat::default(),
            calendar: CalendarDefaults::default(),
        }
    }

    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self::new(ApiClient::new(config.api_base_url()))
            .with_format(NumberFormat::new(
                config.thousands_separator(),
                config.decimal_separator(),
            ))
            .with_calendar(CalendarDefaults {
                timezone: config.timezone().map(str::to_string),
                reminder_minutes: config.reminder_minutes(),
            })
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarDefaults) -> Self {
        self.calendar = calendar;
        self
    }
}

/// How a calculator surfaces a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Written into `element` as `{prefix}{message}`.
    Inline {
        element: &'static str,
        prefix: &'static str,
    },
    /// Blocking alert `{prefix}{message}`.
    Alert { prefix: &'static str },
    /// Logged only.
    LogOnly,
}

impl ErrorDisplay {
    pub fn show(&self, view: &mut dyn View, err: &CalcError) {
        let message = err.user_friendly_message();
        match self {
            ErrorDisplay::Inline { element, prefix } => {
                view.set_text(element, &format!("{}{}", prefix, message))
            }
            ErrorDisplay::Alert { prefix } => view.alert(&format!("{}{}", prefix, message)),
            ErrorDisplay::LogOnly => {}
        }
    }
}

#[async_trait]
pub trait Calculator: Send + Sync {
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn form(&self) -> FormSpec;

    fn error_display(&self) -> ErrorDisplay;

    /// Shows this calculator's form in the modal. Returns false when the page has no modal.
    fn open(&self, view: &mut dyn View) -> bool {
        render_modal(view, self.title(), self.form())
    }

    /// Read → request → render. Errors are returned unrendered; see [`Calculator::submit`].
    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View)
        -> Result<()>;

    async fn submit(
        &self,
        ctx: &CalcContext,
        form: &dyn FormSource,
        view: &mut dyn View,
    ) -> Result<()> {
        let result = self.run(ctx, form, view).await;
        if let Err(e) = &result {
            tracing::error!("{} failed: {}", self.id(), e);
            self.error_display().show(view, e);
        }
        result
    }
}

pub fn render_modal(view: &mut dyn View, title: &str, form: FormSpec) -> bool {
    if !(view.contains(MODAL) && view.contains(MODAL_TITLE) && view.contains(MODAL_CONTENT)) {
        tracing::debug!("No modal on page; '{}' not opened", title);
        return false;
    }
    view.set_text(MODAL_TITLE, title);
    view.clear(MODAL_CONTENT);
    view.append(MODAL_CONTENT, Node::Form(form));
    view.set_hidden(MODAL, false);
    true
}

/// Replaces the children of `container` with one bullet item per entry.
pub(crate) fn render_bullets<I, S>(view: &mut dyn View, container: &str, items: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    view.clear(container);
    for item in items {
        view.append(container, Node::ListItem(format!("• {}", item.as_ref())));
    }
}
