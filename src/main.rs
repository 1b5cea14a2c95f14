use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use helium::config::{reset_all, AppSettings, JsonFileGateway};
use helium::store::WidgetSetStore;
use helium_core::{catalog, LogNotifier, NotchSize, PlacementPreset};
use helium_types::{
    Anchor, AnchorY, Color, OrientationMode, TextAlignment, WidgetConfig, WidgetModule, WidgetSet,
    WidgetSetDetails,
};
use log::{info, warn};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Helium - manage the widget sets shown by the on-screen overlay
#[derive(Parser, Debug)]
#[command(name = "helium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    /// Directory holding the settings files (defaults to the platform config directory)
    #[arg(long = "config-dir", value_name = "DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List widget sets
    List,
    /// Show a widget set and its widgets
    Show { set: usize },
    /// Create an empty widget set
    Create {
        title: String,
        /// Horizontal anchor (0=left, 1=center, 2=right)
        #[arg(long, default_value = "0")]
        anchor: i64,
    },
    /// Remove a widget set
    RemoveSet { set: usize },
    /// Add a widget to a set, optionally configured with KEY=VALUE pairs
    Add {
        set: usize,
        module: WidgetModule,
        #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
        options: Vec<(String, Value)>,
    },
    /// Remove the widget at a position
    Remove { set: usize, widget: usize },
    /// Move widgets so they sit before position TO
    Move {
        set: usize,
        #[arg(required = true)]
        from: Vec<usize>,
        #[arg(long)]
        to: usize,
    },
    /// Change attributes of a widget set
    Edit {
        set: usize,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// List available widget modules
    Catalog,
    /// Preview every widget of a set
    Preview { set: usize },
    /// Show or change application settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Delete all widget sets and settings
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show the notch classification of a device model
    Device { model: Option<String> },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Show,
    Set { key: String, value: String },
}

#[derive(Args, Debug, Default)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    enabled: Option<bool>,
    /// 0=both, 1=portrait only, 2=landscape only
    #[arg(long)]
    orientation: Option<i64>,
    /// Seconds between refreshes
    #[arg(long)]
    interval: Option<f64>,
    #[arg(long)]
    anchor: Option<i64>,
    #[arg(long)]
    anchor_y: Option<i64>,
    #[arg(long)]
    offset_px: Option<f64>,
    #[arg(long)]
    offset_py: Option<f64>,
    #[arg(long)]
    offset_lx: Option<f64>,
    #[arg(long)]
    offset_ly: Option<f64>,
    #[arg(long)]
    auto_resizes: Option<bool>,
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    scale_y: Option<f64>,
    #[arg(long)]
    blur: Option<bool>,
    #[arg(long)]
    corner_radius: Option<f64>,
    #[arg(long)]
    blur_dark: Option<bool>,
    #[arg(long)]
    blur_alpha: Option<f64>,
    #[arg(long)]
    dynamic_color: Option<bool>,
    /// Custom text color as RRGGBB or RRGGBBAA; "none" turns it off
    #[arg(long, value_name = "HEX")]
    color: Option<String>,
    #[arg(long)]
    font_name: Option<String>,
    #[arg(long)]
    bold: Option<bool>,
    #[arg(long)]
    italic: Option<bool>,
    /// 0=left, 1=center, 2=right
    #[arg(long)]
    alignment: Option<i64>,
    #[arg(long)]
    font_size: Option<f64>,
    #[arg(long)]
    text_alpha: Option<f64>,
}

impl EditArgs {
    fn apply(self, d: &mut WidgetSetDetails) -> Result<()> {
        if let Some(v) = self.title {
            d.title = v;
        }
        if let Some(v) = self.enabled {
            d.is_enabled = v;
        }
        if let Some(v) = self.orientation {
            d.orientation_mode = OrientationMode::from_tag(v);
        }
        if let Some(v) = self.interval {
            d.update_interval = v;
        }
        if let Some(v) = self.anchor {
            d.anchor = Anchor::from_tag(v);
        }
        if let Some(v) = self.anchor_y {
            d.anchor_y = AnchorY::from_tag(v);
        }
        d.offset_px = self.offset_px.unwrap_or(d.offset_px);
        d.offset_py = self.offset_py.unwrap_or(d.offset_py);
        d.offset_lx = self.offset_lx.unwrap_or(d.offset_lx);
        d.offset_ly = self.offset_ly.unwrap_or(d.offset_ly);
        d.auto_resizes = self.auto_resizes.unwrap_or(d.auto_resizes);
        d.scale = self.scale.unwrap_or(d.scale);
        d.scale_y = self.scale_y.unwrap_or(d.scale_y);
        d.blur.has_blur = self.blur.unwrap_or(d.blur.has_blur);
        d.blur.corner_radius = self.corner_radius.unwrap_or(d.blur.corner_radius);
        d.blur.style_dark = self.blur_dark.unwrap_or(d.blur.style_dark);
        d.blur.alpha = self.blur_alpha.unwrap_or(d.blur.alpha);
        d.dynamic_color = self.dynamic_color.unwrap_or(d.dynamic_color);
        match self.color.as_deref() {
            None => {}
            Some("none") => d.color.uses_custom_color = false,
            Some(hex) => {
                d.color.color = parse_hex_color(hex)?;
                d.color.uses_custom_color = true;
            }
        }
        if let Some(v) = self.font_name {
            d.font_name = v;
        }
        d.text_bold = self.bold.unwrap_or(d.text_bold);
        d.text_italic = self.italic.unwrap_or(d.text_italic);
        if let Some(v) = self.alignment {
            d.text_alignment = TextAlignment::from_tag(v);
        }
        d.font_size = self.font_size.unwrap_or(d.font_size);
        d.text_alpha = self.text_alpha.unwrap_or(d.text_alpha);
        Ok(())
    }
}

/// Parse "KEY=VALUE". The value is read as JSON when possible, else as text.
fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected format: KEY=VALUE, got: {}", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing key in: {}", s));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Parse RRGGBB or RRGGBBAA, with or without a leading '#'
fn parse_hex_color(s: &str) -> Result<Color> {
    let hex = s.trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) {
        bail!("Expected a color as RRGGBB or RRGGBBAA, got: {}", s);
    }
    let channel = |i: usize| -> Result<u8> {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("Invalid color: {}", s))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info, 2: debug, 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting helium v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let gateway = Arc::new(match cli.config_dir {
        Some(dir) => JsonFileGateway::new(dir),
        None => JsonFileGateway::from_project_dirs()?,
    });
    info!("Using settings in {}", gateway.root().display());

    match cli.command {
        Command::Catalog => {
            for module in WidgetModule::ALL {
                let entry = catalog::describe(module);
                println!("{:<18} {:<20} {}", module.id(), entry.name, entry.example);
            }
        }
        Command::Device { model } => {
            let notch = match model.as_deref() {
                Some(model) => NotchSize::classify(model),
                None => NotchSize::detect(),
            };
            println!("Notch: {} ({})", notch, notch.tag());
            let presets: Vec<&str> = PlacementPreset::ALL.iter().map(|p| p.label()).collect();
            println!("Placement presets: {}", presets.join(", "));
        }
        Command::Settings { action } => {
            let mut settings = AppSettings::load(gateway.as_ref())?;
            match action {
                None | Some(SettingsAction::Show) => print_settings(&settings),
                Some(SettingsAction::Set { key, value }) => {
                    settings.set_value(&key, &value)?;
                    settings
                        .save(gateway.as_ref(), &LogNotifier)
                        .context("Failed to save settings")?;
                    print_settings(&settings);
                }
            }
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("This deletes every widget set and setting; pass --yes to confirm");
            }
            reset_all(gateway.as_ref()).context("Failed to delete stored data")?;
            println!("All data deleted");
        }
        command => run_store_command(command, &gateway)?,
    }

    Ok(())
}

/// Commands that work on the widget set store
fn run_store_command(command: Command, gateway: &Arc<JsonFileGateway>) -> Result<()> {
    let mut store = WidgetSetStore::open(Box::new(gateway.clone()), Box::new(LogNotifier))
        .context("Failed to load widget sets")?;

    match command {
        Command::List => {
            if store.sets().is_empty() {
                println!("No widget sets");
            }
            for (i, set) in store.sets().iter().enumerate() {
                let state = if set.details.is_enabled { "" } else { " [disabled]" };
                println!(
                    "{:>3}  {} ({} widgets){}",
                    i,
                    set.title(),
                    set.widgets.len(),
                    state
                );
            }
        }
        Command::Show { set } => print_set(set_at(&store, set)?),
        Command::Create { title, anchor } => {
            store.create_widget_set(&title, Anchor::from_tag(anchor), true)?;
            println!("Created '{}' at index {}", title, store.sets().len() - 1);
        }
        Command::RemoveSet { set } => {
            let id = set_at(&store, set)?.id();
            store.remove_widget_set(id, true)?;
        }
        Command::Add {
            set,
            module,
            options,
        } => {
            let id = set_at(&store, set)?.id();
            let config = WidgetConfig::from_map(module, options.into_iter().collect::<Map<_, _>>());
            store.add_widget(id, module, Some(&config), true)?;
            println!("Added {} widget", catalog::name(module));
        }
        Command::Remove { set, widget } => {
            let target = set_at(&store, set)?;
            if widget >= target.widgets.len() {
                bail!("'{}' has no widget at position {}", target.title(), widget);
            }
            let id = target.id();
            store.remove_widget_at(id, widget, true)?;
        }
        Command::Move { set, from, to } => {
            let id = set_at(&store, set)?.id();
            store.move_widgets(id, &from, to);
            store.save()?;
        }
        Command::Edit { set, changes } => {
            let target = set_at(&store, set)?;
            let id = target.id();
            let mut details = target.details.clone();
            changes.apply(&mut details)?;
            store.edit_widget_set(id, &details, true)?;
        }
        Command::Preview { set } => {
            let settings = AppSettings::load(gateway.as_ref())?;
            let target = set_at(&store, set)?;
            let id = target.id();
            let widgets: Vec<_> = target.widgets.iter().map(|w| (w.id(), w.module())).collect();
            for (position, (widget, module)) in widgets.into_iter().enumerate() {
                match store.preview_widget(id, widget, &settings) {
                    Some(preview) => {
                        println!("{:>3}  {:<18} {}", position, catalog::name(module), preview)
                    }
                    None => warn!("Widget {} disappeared during preview", widget),
                }
            }
        }
        Command::Catalog
        | Command::Device { .. }
        | Command::Settings { .. }
        | Command::Reset { .. } => {}
    }

    Ok(())
}

fn set_at(store: &WidgetSetStore, index: usize) -> Result<&WidgetSet> {
    store
        .sets()
        .get(index)
        .with_context(|| format!("No widget set at index {}", index))
}

fn print_set(set: &WidgetSet) {
    let d = &set.details;
    println!("{}{}", d.title, if d.is_enabled { "" } else { " [disabled]" });
    println!("  orientation: {:?}, interval: {}s", d.orientation_mode, d.update_interval);
    println!(
        "  anchor: {:?}/{:?}, portrait offset: ({}, {}), landscape offset: ({}, {})",
        d.anchor, d.anchor_y, d.offset_px, d.offset_py, d.offset_lx, d.offset_ly
    );
    println!(
        "  scale: {} x {}, auto resize: {}",
        d.scale, d.scale_y, d.auto_resizes
    );
    println!(
        "  blur: {} (radius {}, dark {}, alpha {})",
        d.blur.has_blur, d.blur.corner_radius, d.blur.style_dark, d.blur.alpha
    );
    let (r, g, b, a) = d.color.color.to_rgba8();
    println!(
        "  dynamic color: {}, custom color: {} (#{:02x}{:02x}{:02x}{:02x})",
        d.dynamic_color, d.color.uses_custom_color, r, g, b, a
    );
    println!(
        "  font: {} {}pt, bold: {}, italic: {}, alignment: {:?}, alpha: {}",
        d.font_name, d.font_size, d.text_bold, d.text_italic, d.text_alignment, d.text_alpha
    );
    println!("  widgets:");
    for (i, widget) in set.widgets.iter().enumerate() {
        println!(
            "  {:>3}  {:<18} {}",
            i,
            catalog::name(widget.module()),
            Value::Object(widget.config().to_map())
        );
    }
}

fn print_settings(settings: &AppSettings) {
    println!("dateLocale              {}", settings.date_locale);
    println!(
        "apiKey                  {}",
        if settings.api_key.is_empty() { "(not set)" } else { "(set)" }
    );
    println!("hideSaveConfirmation    {}", settings.hide_save_confirmation);
    println!("debugBorder             {}", settings.debug_border);
    println!("hideWidgetsInScreenshot {}", settings.hide_widgets_in_screenshot);
}
