use chrono::Days;
use clap::Args;
use gitpaint_core::calendar::temporal::weekday_index;
use gitpaint_core::encode::Encoder;

use crate::cmd::{load_graph, now, EncodeOpts};

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub opts: EncodeOpts,
}

pub fn run(args: PlanArgs) -> anyhow::Result<()> {
    let params = args.opts.params();
    let now = now();
    let graph = load_graph(&args.opts, &params, &now)?;

    // Fails here, before anything is committed, if a cell lands in the future.
    let encoder = Encoder::new(&graph, &params, now)?;

    let active = graph.records().iter().filter(|r| r.intensity > 0).count();

    println!("--- plan ---");
    println!("image           = {}", args.opts.img);
    println!("grid            = {}x{}", graph.width(), graph.height());
    println!("today_weekday   = {}", weekday_index(&now));
    println!("weeks_ago       = {}", params.weeks_ago);
    println!("multiplier      = {}", params.multiplier);
    println!("content         = {:?}", params.content_mode);
    println!("records         = {}", graph.records().len());
    println!("active_records  = {}", active);
    println!("commits         = {}", encoder.total_commits());

    if let Some((newest, oldest)) = graph.active_span() {
        let day = |d: i64| {
            now.checked_sub_days(Days::new(d as u64))
                .map(|t| t.date_naive().to_string())
                .unwrap_or_else(|| "?".into())
        };
        println!("oldest_day      = {} ({} days ago)", day(oldest), oldest);
        println!("newest_day      = {} ({} days ago)", day(newest), newest);
    }

    Ok(())
}
