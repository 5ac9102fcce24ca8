use clap::{Args, Parser, Subcommand};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "julia-field",
    version,
    about = "Animated Julia-set field drawn with terminal glyphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Animate the field
    Run(RunArgs),
    /// Render a single frame at a fixed t
    Frame(FrameArgs),
    /// Explain what is on screen
    Explain,
    /// List palettes with a preview ramp
    Palettes,
    /// Show available tint names / hex syntax
    Colors,
    /// Print example invocations
    Examples,
}

/// Grid geometry shared by `run` and `frame`.
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Field width in characters
    #[arg(long, default_value_t = 80)]
    pub width: usize,
    /// Field height in characters
    #[arg(long, default_value_t = 40)]
    pub height: usize,
    /// Size the field to the terminal (overrides --width/--height)
    #[arg(long)]
    pub fit: bool,
    /// Palette name (blocks, ascii, dots) or `=` followed by literal symbols
    #[arg(long, default_value = "blocks")]
    pub palette: String,
}

/// `julia-field run …`
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of frames
    #[arg(long, default_value_t = 20)]
    pub cycles: usize,
    /// Seconds between frames
    #[arg(long, default_value_t = 0.3, value_parser = parse_float)]
    pub delay: f64,
    /// Per-cell noise probability
    #[arg(long, default_value_t = 0.02, value_parser = parse_float)]
    pub noise: f64,
    /// Frames rendered without noise
    #[arg(long, default_value_t = 6)]
    pub warm_up: usize,
    /// Time advance per frame
    #[arg(long, default_value_t = 0.2, value_parser = parse_float, allow_hyphen_values = true)]
    pub step: f64,
    /// Seed for the noise generator (clock-seeded if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tint (name, `#RRGGBB`, or `none`)
    #[arg(long, default_value = "violet")]
    pub color: String,
    /// Append frames as plain text instead of redrawing the screen
    #[arg(long)]
    pub plain: bool,
    /// Redraw only rows that changed
    #[arg(long)]
    pub delta: bool,

    /// Staged start-up banner
    #[arg(long)]
    pub intro: bool,
    /// Print the explanation once the run ends
    #[arg(long)]
    pub explain: bool,
    /// Emit timing diagnostics
    #[arg(long)]
    pub debug: bool,
}

/// `julia-field frame …`
#[derive(Parser, Debug)]
pub struct FrameArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Time parameter
    #[arg(short, long, default_value_t = 0.0, value_parser = parse_float, allow_hyphen_values = true)]
    pub t: f64,
    /// Per-cell noise probability
    #[arg(long, default_value_t = 0.0, value_parser = parse_float)]
    pub noise: f64,
    /// Seed for the noise generator
    #[arg(long)]
    pub seed: Option<u64>,
    /// Tint (name, `#RRGGBB`, or `none`)
    #[arg(long, default_value = "none")]
    pub color: String,
}

/// Float flags go through lexical-core; a Unicode minus (U+2212) counts
/// as `-` so pasted values work.
pub fn parse_float(s: &str) -> Result<f64, String> {
    let mut buf = s.trim().as_bytes().to_vec();
    normalize_unicode_minus(&mut buf);
    lexical_core::parse::<f64>(&buf).map_err(|_| format!("`{s}` is not a number"))
}

#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}
