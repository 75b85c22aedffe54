use crate::application::{Config, DemoView, PlainRenderer, Theme};
use crate::entities::{DisplayState, Interpretation, Session};
use crate::infrastructure::{
    DateFormatter, Epochizer, HookRegistry, SimpleLoggerHook, SystemClock,
};
use anyhow::{Context, Result};

pub struct EpochalApp {
    session: Session,
    config: Config,
    theme: Theme,
    formatter: Box<dyn DateFormatter>,
}

impl EpochalApp {
    pub fn new(config: Config) -> Self {
        Self::with_default_plugins(config)
    }

    pub fn with_default_plugins(config: Config) -> Self {
        let mut hook_registry = HookRegistry::new();
        hook_registry.register(SimpleLoggerHook);

        let session =
            Session::with_hooks(Box::new(Epochizer::new()), Box::new(SystemClock), hook_registry);
        Self::from_parts(session, config)
    }

    pub fn without_plugins(config: Config) -> Self {
        let session = Session::new(Box::new(Epochizer::new()), Box::new(SystemClock));
        Self::from_parts(session, config)
    }

    fn from_parts(session: Session, config: Config) -> Self {
        let session = session.with_initial_input(config.initial_input.clone());
        let theme = Theme::by_name(&config.theme);
        let formatter = config.date_style.formatter();

        Self {
            session,
            config,
            theme,
            formatter,
        }
    }

    pub fn with_theme(mut self, name: &str) -> Self {
        self.theme = Theme::by_name(name);
        self
    }

    pub fn with_initial_input(mut self, input: impl Into<String>) -> Self {
        self.session.text_changed(input);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run_tui(&mut self) -> Result<()> {
        log::info!(
            "Starting demo view (theme: {}, dates: {:?})",
            self.theme.name,
            self.config.date_style
        );

        let mut view = DemoView::new(&mut self.session, self.theme.clone(), self.formatter.as_ref())
            .context("Failed to start the terminal interface")?;
        view.run().context("Terminal interface failed")?;
        Ok(())
    }

    /// Feed `text` to the session once and return what it would display
    pub fn interpret(&mut self, text: &str) -> (DisplayState, Interpretation) {
        self.session.text_changed(text);
        (self.session.display_state(), self.session.interpretation())
    }

    pub fn print_interpretation(&mut self, text: &str, json: bool) -> Result<()> {
        let (state, interpretation) = self.interpret(text);

        if json {
            let encoded = serde_json::to_string_pretty(&interpretation)
                .context("Failed to encode interpretation as JSON")?;
            println!("{}", encoded);
        } else {
            PlainRenderer::new(&self.theme, self.formatter.as_ref())
                .render_display_state(text, &state);
        }

        Ok(())
    }
}
