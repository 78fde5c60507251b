//! Light/dark theme and the bus that announces theme changes
//!
//! Components that style themselves from the theme (the chart board, mainly)
//! take a `ThemeSubscription` and drain it before drawing. The app publishes
//! on every toggle; nothing inspects the rendered output to detect a change.

use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};

use ratatui::style::Color;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label of the toggle button: it offers the other theme
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "Modo oscuro",
            Theme::Dark => "Modo claro",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::Rgb(0xff, 0xff, 0xff),
                surface: Color::Rgb(0xf9, 0xfa, 0xfb),
                text: Color::Rgb(0x11, 0x18, 0x27),
                muted: Color::Rgb(0x6b, 0x72, 0x80),
                grid: Color::Rgb(0xe5, 0xe7, 0xeb),
                accent: Color::Rgb(85, 70, 150),
                accent_soft: Color::Rgb(0xd1, 0xd5, 0xdb),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(0x11, 0x18, 0x27),
                surface: Color::Rgb(0x37, 0x41, 0x51),
                text: Color::Rgb(0xf3, 0xf4, 0xf6),
                muted: Color::Rgb(0x9c, 0xa3, 0xaf),
                grid: Color::Rgb(0x37, 0x41, 0x51),
                accent: Color::Rgb(85, 70, 150),
                accent_soft: Color::Rgb(0x4b, 0x55, 0x63),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "claro" => Ok(Theme::Light),
            "dark" | "oscuro" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Colors derived from a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub grid: Color,
    pub accent: Color,
    pub accent_soft: Color,
}

/// Receiving end handed to theme-dependent components
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: Receiver<Theme>,
}

impl ThemeSubscription {
    /// Most recent theme published since the last call, if any
    pub fn latest(&self) -> Option<Theme> {
        let mut latest = None;
        while let Ok(theme) = self.rx.try_recv() {
            latest = Some(theme);
        }
        latest
    }
}

#[derive(Debug, Default)]
pub struct ThemeBus {
    subscribers: Vec<Sender<Theme>>,
}

impl ThemeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> ThemeSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        ThemeSubscription { rx }
    }

    /// Sends to every live subscriber and forgets the dropped ones
    pub fn publish(&mut self, theme: Theme) {
        self.subscribers.retain(|tx| tx.send(theme).is_ok());
        info!(theme = theme.as_str(), subscribers = self.subscribers.len(), "theme changed");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
