use std::{
    io::{Write, stdout},
    thread::sleep,
    time::Duration,
};

use crate::{
    core::{
        bounds::{fit_field, terminal_geometry},
        color::{NAMED_TINTS, Tint},
        config::{AnimationConfig, FieldConfig},
        error::FieldError,
        julia::julia_constant,
        palette::{NAMED, Palette},
        rng::Lcg,
    },
    render::{
        Animation, CancelToken, Field, FrameSink, PlainSink, Sleeper, Strategy,
        TerminalSink,
    },
};

use super::{
    parse::{FrameArgs, GridArgs, RunArgs},
    signal, tty_raw,
};

fn field_config(g: &GridArgs) -> Result<FieldConfig, FieldError> {
    let (w, h) = if g.fit {
        fit_field(terminal_geometry())?
    } else {
        (g.width, g.height)
    };
    Ok(FieldConfig::builder(w, h)
        .palette(Palette::from_name(&g.palette)?)
        .build()?)
}

#[allow(clippy::cast_precision_loss, clippy::needless_pass_by_value)]
pub fn run(a: RunArgs) -> Result<(), FieldError> {
    let field_cfg = field_config(&a.grid)?;
    let anim_cfg = AnimationConfig::builder()
        .cycles(a.cycles)
        .delay(a.delay)
        .noise(a.noise)
        .warm_up(a.warm_up)
        .step(a.step)
        .seed_opt(a.seed)
        .build()?;
    let tint = Tint::parse(&a.color)?;

    let cancel = CancelToken::new();
    signal::cancel_on_interrupt(cancel.clone())?;
    let raw = if a.plain {
        None
    } else {
        tty_raw::watch_keys(cancel.clone())
    };

    if a.intro {
        intro(raw.is_some());
    }

    let mut sink: Box<dyn FrameSink> = if a.plain {
        Box::new(PlainSink::new(stdout().lock()))
    } else {
        let strat = if a.delta {
            Strategy::Delta
        } else {
            Strategy::Full
        };
        Box::new(
            TerminalSink::stdout(strat, field_cfg.width, field_cfg.height)
                .title(format!("Julia Field · {}", a.grid.palette))
                .tint(tint)
                .subtitle(stop_hint(raw.is_some())),
        )
    };

    let mut anim = Animation::new(&field_cfg, anim_cfg);
    let report = anim.run(sink.as_mut(), &mut Sleeper::default(), &cancel);
    drop(sink);
    drop(raw);

    if a.debug {
        let frames = (report.emitted + report.faulted).max(1) as f64;
        eprintln!(
            "run {:?}: {} frames shown, {} skipped\n   avg render {:.1} µs   avg emit {:.1} µs",
            report.outcome,
            report.emitted,
            report.faulted,
            report.render_time.as_micros() as f64 / frames,
            report.emit_time.as_micros() as f64 / frames,
        );
    }
    if a.explain {
        explain(a.step);
    }
    Ok(())
}

pub fn frame(a: &FrameArgs) -> Result<(), FieldError> {
    let cfg = field_config(&a.grid)?;
    let tint = Tint::parse(&a.color)?;
    // validates the probability the same way `run` does
    let noise = AnimationConfig::builder().noise(a.noise).build()?.noise;

    let mut field = Field::new(&cfg);
    field.render(a.t)?;
    if noise > 0.0 {
        let mut rng = a.seed.map_or_else(Lcg::seed_from_time, Lcg::seed);
        field.sprinkle_noise(&mut rng, noise);
    }

    let mut out = stdout().lock();
    for line in field.grid().lines() {
        writeln!(out, "{}", tint.paint(&line))?;
    }
    out.flush()?;
    Ok(())
}

/// Staged start-up banner. `keys` says whether `q` is being watched.
fn intro(keys: bool) {
    const STAGES: [(&str, u64); 4] = [
        ("mapping the viewport onto the complex plane", 300),
        ("tuning c(t) = (-0.7 + 0.1·sin t) + (0.27015 + 0.05·cos t)i", 250),
        ("loading the glyph ramp", 200),
        ("ready", 150),
    ];
    for (msg, ms) in STAGES {
        println!("• {msg}");
        sleep(Duration::from_millis(ms));
    }
    println!("press {}\n", stop_hint(keys));
}

fn stop_hint(keys: bool) -> &'static str {
    if keys { "q or Ctrl-C to stop" } else { "Ctrl-C to stop" }
}

/// What the animation actually computes, for a time advance of `step`.
pub fn explain(step: f64) {
    print!("{}", explain_text(step));
}

fn explain_text(step: f64) -> String {
    format!(
        "
How the field is drawn
----------------------
• Every character cell (x, y) becomes a point z of the complex plane,
  centred on the grid and drifting slowly with time t.
• The point is iterated with z ← z² + c, where
  c = (-0.7 + 0.1·sin t) + (0.27015 + 0.05·cos t)i.
• Up to 30 steps: the first step at which |z| > 2 gives the escape
  fraction i/30; points that never escape score 1.0.
• The fraction picks a glyph from sparse to dense: {}.
• At t = 0, c = {}.
• t advances by {step} per frame, so c and the viewport move and the
  pattern morphs. After a few clean frames a little noise is sprinkled in.
",
        Palette::default().symbols().iter().collect::<String>(),
        julia_constant(0.0),
    )
}

/// List palettes with their ramp.
pub fn palettes() {
    println!("\nPalettes (sparse → dense):");
    for (name, symbols) in NAMED {
        println!("  {name:<8} [{}]", symbols.iter().collect::<String>());
    }
    println!("  =RAMP    any literal ramp of 2+ symbols, e.g. '= .oO@'\n");
}

/// Pretty-print available tint names + an example hex code.
pub fn colors() {
    println!("\nPossible tints:");
    for (name, _) in NAMED_TINTS {
        if let Ok(t) = Tint::parse(name) {
            println!("  {}", t.paint(name));
        }
    }
    println!("  none     (no escape codes)");
    println!(
        "  {}  (#505050 or any other #RRGGBB)\n",
        Tint::rgb(0x50, 0x50, 0x50).paint("#505050")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "cargo run --"; // adjust if you rename the binary
    println!(
        "
Example invocations
-------------------
• Classic run        : {bin} run
• Fill the terminal  : {bin} run --fit --delta
• Longer, no noise   : {bin} run --cycles 60 --noise 0
• Reproducible noise : {bin} run --seed 42
• ASCII only         : {bin} run --palette ascii --color none
• Custom ramp        : {bin} run --palette '= .oO@'
• Pipe-friendly      : {bin} run --plain --delay 0 --cycles 3
• One still frame    : {bin} frame --t 1.4 --width 60 --height 30
• Timing diagnostics : {bin} run --debug
"
    );
}
