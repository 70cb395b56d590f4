//! Main TUI application

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::app::events::{is_help, is_quit, tab_delta, tab_number, AppEvent, EventHandler};
use crate::app::state::{AppMessage, DataEvent};
use crate::browser::{BrowserError, CellFormatter, PageSize};
use crate::models::DocumentKind;
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::tabs::{
    documents::DocumentsTab, partners, partners::PartnersTab, products, products::ProductsTab,
    stock, stock::StockTab,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::popup::Popup;
use crate::ui::widgets::statusbar::{build_status_line, StatusItem};
use crate::utils::LocaleFormatter;

/// Tab identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Products = 0,
    Partners = 1,
    Sales = 2,
    Purchases = 3,
    Stock = 4,
}

impl TabId {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Partners => "Partners",
            Self::Sales => "Sales",
            Self::Purchases => "Purchases",
            Self::Stock => "Stock",
        }
    }

    pub fn all() -> &'static [TabId] {
        &[
            Self::Products,
            Self::Partners,
            Self::Sales,
            Self::Purchases,
            Self::Stock,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// What the main loop should do after a key
#[derive(Debug, Clone, PartialEq)]
pub enum KeyResult {
    Continue,
    Quit,
    Send(AppMessage),
}

/// Every tab plus the chrome around them, independent of the terminal
pub struct Dashboard {
    current_tab: usize,
    show_help: bool,
    status: Option<StatusMessage>,
    last_loaded: Option<DateTime<Local>>,

    products: ProductsTab,
    partners: PartnersTab,
    sales: DocumentsTab,
    purchases: DocumentsTab,
    stock: StockTab,
}

impl Dashboard {
    pub fn new(page_size: PageSize) -> Result<Self, BrowserError> {
        Ok(Self {
            current_tab: 0,
            show_help: false,
            status: None,
            last_loaded: None,
            products: products::new(page_size)?,
            partners: partners::new(page_size)?,
            sales: DocumentsTab::new(DocumentKind::Sale, page_size)?,
            purchases: DocumentsTab::new(DocumentKind::Purchase, page_size)?,
            stock: stock::new(page_size)?,
        })
    }

    pub fn current_tab(&self) -> TabId {
        TabId::all()[self.current_tab]
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn apply_event(&mut self, event: DataEvent) {
        match event {
            DataEvent::Loaded(dataset) => {
                let dataset = *dataset;
                self.products.load(dataset.products);
                self.partners.load(dataset.partners);
                self.sales.load(dataset.sales);
                self.purchases.load(dataset.purchases);
                self.stock.load(dataset.stock);
                self.last_loaded = Some(Local::now());
            }
            DataEvent::DocumentUpdated(document) => {
                let updated = match document.kind {
                    DocumentKind::Sale => self.sales.apply_update(&document),
                    DocumentKind::Purchase => self.purchases.apply_update(&document),
                };
                if !updated {
                    tracing::warn!("Updated document {} is not loaded", document.number);
                }
                self.status = Some(StatusMessage::Info(format!(
                    "{} is now {}",
                    document.number, document.status
                )));
            }
            DataEvent::InvoiceExported { number, path } => {
                self.status = Some(StatusMessage::Info(format!(
                    "Invoice {} written to {}",
                    number,
                    path.display()
                )));
            }
            DataEvent::Error(message) => {
                self.status = Some(StatusMessage::Error(message));
            }
        }
    }

    fn tab_captures_input(&self) -> bool {
        match self.current_tab() {
            TabId::Products => self.products.captures_input(),
            TabId::Partners => self.partners.captures_input(),
            TabId::Sales => self.sales.captures_input(),
            TabId::Purchases => self.purchases.captures_input(),
            TabId::Stock => self.stock.captures_input(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.show_help {
            self.show_help = false;
            return KeyResult::Continue;
        }

        if !self.tab_captures_input() {
            if is_quit(&key) {
                return KeyResult::Quit;
            }
            if is_help(&key) {
                self.show_help = true;
                return KeyResult::Continue;
            }
            if key.code == KeyCode::Char('r') && key.modifiers == KeyModifiers::NONE {
                self.status = Some(StatusMessage::Info("Reloading...".to_string()));
                return KeyResult::Send(AppMessage::Reload);
            }
            if let Some(tab) = tab_number(&key) {
                self.current_tab = tab.min(TabId::all().len() - 1);
                return KeyResult::Continue;
            }
            if let Some(delta) = tab_delta(&key) {
                let len = TabId::all().len() as i32;
                self.current_tab = (self.current_tab as i32 + delta).rem_euclid(len) as usize;
                return KeyResult::Continue;
            }
        } else if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return KeyResult::Quit;
        }

        let message = match self.current_tab() {
            TabId::Products => {
                self.products.handle_key(key);
                self.products.take_status()
            }
            TabId::Partners => {
                self.partners.handle_key(key);
                self.partners.take_status()
            }
            TabId::Stock => {
                self.stock.handle_key(key);
                self.stock.take_status()
            }
            TabId::Sales => {
                if let Some(msg) = self.sales.handle_key(key) {
                    return KeyResult::Send(msg);
                }
                self.sales.table_mut().take_status()
            }
            TabId::Purchases => {
                if let Some(msg) = self.purchases.handle_key(key) {
                    return KeyResult::Send(msg);
                }
                self.purchases.table_mut().take_status()
            }
        };
        if let Some(message) = message {
            self.status = Some(StatusMessage::Error(message));
        }
        KeyResult::Continue
    }

    fn tab_summary(&self) -> String {
        match self.current_tab() {
            TabId::Products => self.products.summary(),
            TabId::Partners => self.partners.summary(),
            TabId::Sales => self.sales.table().summary(),
            TabId::Purchases => self.purchases.table().summary(),
            TabId::Stock => self.stock.summary(),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, theme: &Theme, formatter: &dyn CellFormatter) {
        let layout = AppLayout::new(frame.area());
        let current_tab = self.current_tab;

        let tab_titles: Vec<Line> = TabId::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if i == current_tab {
                    theme.tab_active()
                } else {
                    theme.tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, tab.title()), style))
            })
            .collect();

        let tabs = Tabs::new(tab_titles)
            .select(current_tab)
            .highlight_style(theme.tab_active())
            .divider("|");
        frame.render_widget(tabs, layout.tabs);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(format!(" {} ", self.current_tab().title()));
        let inner = content_block.inner(layout.content);
        frame.render_widget(content_block, layout.content);

        match self.current_tab() {
            TabId::Products => self.products.render(frame, inner, theme, formatter),
            TabId::Partners => self.partners.render(frame, inner, theme, formatter),
            TabId::Sales => self.sales.render(frame, inner, theme, formatter),
            TabId::Purchases => self.purchases.render(frame, inner, theme, formatter),
            TabId::Stock => self.stock.render(frame, inner, theme, formatter),
        }

        let status = match &self.status {
            Some(StatusMessage::Info(text)) => {
                StatusItem::new("", text).with_style(theme.success())
            }
            Some(StatusMessage::Error(text)) => StatusItem::new("", text).with_style(theme.error()),
            None => StatusItem::new("", ""),
        };
        let loaded = self
            .last_loaded
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        let status_line = build_status_line(
            vec![
                StatusItem::new("", &self.tab_summary()).with_style(theme.normal()),
                StatusItem::new("Loaded", &loaded).with_style(theme.dim()),
                status,
                StatusItem::new("", "r=reload ?=help q=quit").with_style(theme.dim()),
            ],
            "│",
        );
        frame.render_widget(Paragraph::new(status_line), layout.status);

        if self.show_help {
            render_help(frame, theme);
        }
    }
}

/// Terminal front end around a [`Dashboard`]
pub struct TuiApp {
    state_tx: mpsc::Sender<AppMessage>,
    event_rx: mpsc::UnboundedReceiver<DataEvent>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    theme: Theme,
    formatter: LocaleFormatter,
    dashboard: Dashboard,
}

impl TuiApp {
    pub fn new(
        state_tx: mpsc::Sender<AppMessage>,
        event_rx: mpsc::UnboundedReceiver<DataEvent>,
        dashboard: Dashboard,
        theme: Theme,
        formatter: LocaleFormatter,
    ) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state_tx,
            event_rx,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            theme,
            formatter,
            dashboard,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state_tx.send(AppMessage::Reload).await?;

        loop {
            while let Ok(event) = self.event_rx.try_recv() {
                self.dashboard.apply_event(event);
            }

            self.draw()?;

            if let Some(AppEvent::Key(key)) = self.event_handler.next() {
                match self.dashboard.handle_key(key) {
                    KeyResult::Quit => break,
                    KeyResult::Send(msg) => {
                        if let Err(e) = self.state_tx.send(msg).await {
                            tracing::error!("State manager is gone: {}", e);
                            break;
                        }
                    }
                    KeyResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let dashboard = &mut self.dashboard;
        let theme = &self.theme;
        let formatter = &self.formatter;
        self.terminal
            .draw(|frame| dashboard.draw(frame, theme, formatter))?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = DialogLayout::centered(frame.area(), 62, 26).dialog;

    let help_text = [
        "",
        "  Tabs",
        "    1-5, Tab/Shift-Tab   Switch tabs",
        "    r                    Reload from database",
        "",
        "  Tables",
        "    ↑/↓, j/k, g/G        Move selection",
        "    n/p, PgDn/PgUp       Next/previous page",
        "    [ / ]                First/last page",
        "    ←/→, h/l             Focus column",
        "    s                    Sort focused column (asc, desc, off)",
        "    + / -                Larger/smaller pages",
        "    /                    Search, Esc clears",
        "    c                    Show/hide columns",
        "    Enter                Open details",
        "",
        "  Documents",
        "    P                    Mark as paid",
        "    x                    Export invoice (sales)",
        "",
        "  Press any key to close",
    ];

    Popup::new("Help", help_text.join("\n"))
        .with_style(theme.normal())
        .with_border_style(theme.border_focused())
        .render(frame, area);
}
