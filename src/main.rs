use anyhow::{anyhow, bail, Context, Result};
use monthgrid::calendar::grid;
use monthgrid::{
    CalendarConfig, CalendarContext, CalendarDate, CalendarPicker, MonthDescriptor,
    SelectionController, SelectionMode, YearMonth,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "\
usage: mg grid [YYYY-MM] [--adjacent] [--json]
       mg months
       mg pick <none|single|multiple|range> YYYY-MM-DD...";

fn main() -> Result<()> {
    // Logging to stderr so it doesn't mix with command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(|s| s.as_str()) {
        Some("grid")   => cmd_grid(&args[1..]),
        Some("months") => cmd_months(),
        Some("pick")   => cmd_pick(&args[1..]),
        _              => { println!("{USAGE}"); Ok(()) }
    }
}

fn load_config() -> CalendarConfig {
    CalendarConfig::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring config: {e}");
        CalendarConfig::default()
    })
}

// ─── mg grid ──────────────────────────────────────────────────────────────────

fn cmd_grid(args: &[String]) -> Result<()> {
    let cfg  = load_config();
    let ctx  = CalendarContext::new(cfg.week_start);
    let json = args.iter().any(|a| a == "--json");
    let adjacent = cfg.show_adjacent_months || args.iter().any(|a| a == "--adjacent");

    let ym = match args.iter().find(|a| !a.starts_with("--")) {
        Some(s) => s.parse::<YearMonth>()?,
        None    => ctx.today.year_month(),
    };
    let month = grid::month_descriptor(&ctx, ym, adjacent);

    if json {
        println!("{}", serde_json::to_string_pretty(&month)?);
        return Ok(());
    }

    let picker_cfg = CalendarConfig {
        start_date: ym.first_day(),
        end_date:   ym.first_day(),
        show_adjacent_months: adjacent,
        ..cfg
    };
    let picker = CalendarPicker::new(picker_cfg, ctx.with_today(ym.first_day()))?;
    if let Some(title) = picker.title()? {
        println!("{title}");
    }
    println!("{}", picker.weekday_symbols().iter().map(|s| format!("{s:>4}")).collect::<String>());
    print_rows(&month, picker.visible_rows(), ctx.today);
    Ok(())
}

fn print_rows(month: &MonthDescriptor, rows: usize, today: CalendarDate) {
    for week in month.weeks().take(rows) {
        let line: String = week.iter().map(|cell| match cell {
            None                          => "    ".to_owned(),
            Some(d) if *d == today        => format!(" *{:>2}", d.day()),
            Some(d) if month.contains(*d) => format!("{:>4}", d.day()),
            Some(d)                       => format!("({:>2})", d.day()),
        }).collect();
        println!("{}", line.trim_end());
    }
}

// ─── mg months ────────────────────────────────────────────────────────────────

fn cmd_months() -> Result<()> {
    let cfg    = load_config();
    let picker = CalendarPicker::new(cfg, CalendarContext::default())
        .context("building month list from config")?;
    for (i, m) in picker.months().iter().enumerate() {
        let mark = if i == picker.current_index() { "*" } else { " " };
        println!("{mark} {}", m.year_month());
    }
    Ok(())
}

// ─── mg pick ──────────────────────────────────────────────────────────────────

fn cmd_pick(args: &[String]) -> Result<()> {
    let (mode, dates) = args.split_first().ok_or_else(|| anyhow!("missing selection mode\n{USAGE}"))?;
    let mode: SelectionMode = mode.parse().map_err(|e: String| anyhow!(e))?;
    if dates.is_empty() {
        bail!("no dates to tap\n{USAGE}");
    }

    let mut ctl = SelectionController::new(CalendarContext::default(), mode, false);
    for raw in dates {
        let date = raw.parse::<CalendarDate>().with_context(|| format!("tap {raw}"))?;
        match ctl.handle_selected_date(date, date.year_month()) {
            Some(ev) => println!("{date}: {}", serde_json::to_string(&ev)?),
            None     => println!("{date}: -"),
        }
    }
    println!("{}", serde_json::to_string_pretty(ctl.state())?);
    Ok(())
}
