use crate::error::{Result, SvnshimError};
use crate::filter::StyleTag;
use console::{Color, Style};
use std::collections::HashMap;

/// Built-in color scheme: `(foreground, background)` color names, `None`
/// meaning the terminal default.
fn default_colors(tag: StyleTag) -> (Option<&'static str>, Option<&'static str>) {
	match tag {
		StyleTag::DiffAdd => (Some("lightblue"), None),
		StyleTag::DiffRemoved => (Some("lightred"), None),
		StyleTag::DiffMisc => (Some("darkyellow"), None),
		StyleTag::StatusAdded => (Some("darkgreen"), None),
		StyleTag::StatusDeleted => (Some("darkred"), None),
		StyleTag::StatusUpdated => (Some("lightblue"), None),
		StyleTag::StatusConflict => (Some("lightwhite"), Some("darkred")),
		StyleTag::StatusModified => (Some("lightblue"), None),
		StyleTag::StatusMerged => (Some("darkmagenta"), None),
		StyleTag::StatusUntracked => (Some("lightblack"), None),
		StyleTag::Status => (Some("lightblack"), None),
		StyleTag::Info => (Some("darkgreen"), None),
		StyleTag::LogRev => (Some("lightyellow"), None),
		StyleTag::LogCommitter => (Some("lightblue"), None),
		StyleTag::LogDate => (Some("lightblack"), None),
		StyleTag::LogNumLines => (Some("lightblack"), None),
		StyleTag::LogFieldSeparator => (Some("lightblack"), None),
		StyleTag::LogSeparator => (Some("darkgreen"), None),
		StyleTag::LogText => (Some("darkwhite"), None),
		StyleTag::Warning => (Some("lightwhite"), Some("darkred")),
		StyleTag::Plain => (None, None),
	}
}

/// Parse a `dark`/`light` color name into a console color and brightness.
fn parse_color(style_key: &str, name: &str) -> Result<(Color, bool)> {
	let (bright, base) = if let Some(base) = name.strip_prefix("light") {
		(true, base)
	} else if let Some(base) = name.strip_prefix("dark") {
		(false, base)
	} else {
		return Err(SvnshimError::InvalidColor {
			style: style_key.to_string(),
			color: name.to_string(),
		});
	};

	let color = match base {
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"white" => Color::White,
		_ => {
			return Err(SvnshimError::InvalidColor {
				style: style_key.to_string(),
				color: name.to_string(),
			});
		}
	};
	Ok((color, bright))
}

fn build_style(
	key: &str,
	foreground: Option<&str>,
	background: Option<&str>,
) -> Result<Style> {
	let mut style = Style::new().force_styling(true);
	if let Some(name) = foreground {
		let (color, bright) = parse_color(key, name)?;
		style = style.fg(color);
		if bright {
			style = style.bright();
		}
	}
	if let Some(name) = background {
		let (color, bright) = parse_color(key, name)?;
		style = style.bg(color);
		if bright {
			style = style.on_bright();
		}
	}
	Ok(style)
}

/// Immutable per-invocation color scheme. Built once at startup from the
/// defaults plus the `[colors]` config section; with color disabled no
/// styles are built and text passes through untouched.
#[derive(Debug, Clone, Default)]
pub struct ColorScheme {
	enabled: bool,
	styles: HashMap<StyleTag, Style>,
}

impl ColorScheme {
	/// A scheme that never styles anything.
	pub fn disabled() -> Self {
		ColorScheme::default()
	}

	/// Build the scheme, applying `[colors]` overrides. Override values are
	/// `"foreground"` or `"foreground,background"`; `default` keeps the
	/// built-in color. Unknown style keys are ignored.
	pub fn from_config(overrides: &HashMap<String, String>, enabled: bool) -> Result<Self> {
		let overrides: HashMap<String, &String> = overrides
			.iter()
			.map(|(k, v)| (k.to_lowercase(), v))
			.collect();

		let mut styles = HashMap::new();
		for &tag in StyleTag::ALL {
			let key = tag.config_key();
			let (default_fg, default_bg) = default_colors(tag);
			let mut foreground = default_fg.map(str::to_string);
			let mut background = default_bg.map(str::to_string);

			if let Some(value) = overrides.get(key) {
				let parts: Vec<&str> = value.split(',').map(str::trim).collect();
				let (fg_part, bg_part) = match parts.as_slice() {
					[fg] => (*fg, None),
					[fg, bg] => (*fg, Some(*bg)),
					_ => {
						return Err(SvnshimError::InvalidColorSpec {
							style: key.to_string(),
						});
					}
				};
				if !fg_part.is_empty() && fg_part != "default" {
					parse_color(key, fg_part)?;
					foreground = Some(fg_part.to_string());
				}
				if let Some(bg) = bg_part
					&& !bg.is_empty() && bg != "default"
				{
					parse_color(key, bg)?;
					background = Some(bg.to_string());
				}
			}

			if enabled {
				styles.insert(
					tag,
					build_style(key, foreground.as_deref(), background.as_deref())?,
				);
			}
		}

		Ok(ColorScheme { enabled, styles })
	}

	pub fn enabled(&self) -> bool {
		self.enabled
	}

	/// Render text in the given style. With color disabled, or for plain
	/// text, the input comes back unchanged.
	pub fn paint(&self, tag: StyleTag, text: &str) -> String {
		if !self.enabled || tag == StyleTag::Plain {
			return text.to_string();
		}
		match self.styles.get(&tag) {
			Some(style) => style.apply_to(text).to_string(),
			None => text.to_string(),
		}
	}
}
