use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use district_control::{AutopilotController, CommandSource};
use district_core::{Event, GameState, Role};
use district_world::{build_initial_state, load_content};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "district_cli", about = "District Wars headless runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the session with the autopilot for a fixed number of background ticks.
    Run {
        #[arg(long)]
        ticks: u64,
        /// Start a fresh session with this seed. Mutually exclusive with --state.
        #[arg(long, conflicts_with = "state_file")]
        seed: Option<u64>,
        /// Resume from a GameState JSON snapshot. Mutually exclusive with --seed.
        #[arg(long = "state", conflicts_with = "seed")]
        state_file: Option<String>,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        #[arg(long, default_value = "civilian")]
        role: Role,
        #[arg(long, default_value_t = 100)]
        print_every: u64,
        /// Write the final GameState JSON here.
        #[arg(long)]
        save: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

struct RunArgs {
    ticks: u64,
    seed: Option<u64>,
    state_file: Option<String>,
    content_dir: String,
    role: Role,
    print_every: u64,
    save: Option<String>,
}

fn run(args: RunArgs) -> Result<()> {
    let content = load_content(&args.content_dir)?;
    let start = Utc::now();

    let (mut state, mut rng) = if let Some(path) = &args.state_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading state file: {path}"))?;
        let loaded: GameState =
            serde_json::from_str(&json).with_context(|| format!("parsing state file: {path}"))?;
        let rng_seed = loaded.meta.seed;
        (loaded, ChaCha8Rng::seed_from_u64(rng_seed))
    } else {
        let resolved_seed = args.seed.unwrap_or_else(rand::random);
        (
            build_initial_state(&content, resolved_seed, start),
            ChaCha8Rng::seed_from_u64(resolved_seed),
        )
    };

    let mut autopilot = AutopilotController::new(args.role);
    let step = Duration::seconds(i64::try_from(content.constants.background_tick_secs)?);
    let print_every = args.print_every.max(1);

    println!(
        "Starting session: ticks={} seed={} districts={} content_version={}",
        args.ticks,
        state.meta.seed,
        state.districts.len(),
        content.content_version,
    );
    println!("{}", "-".repeat(80));

    for i in 0..args.ticks {
        let now = start + step * i32::try_from(i)?;
        let mut events = Vec::new();
        for command in autopilot.generate_commands(&state, &content) {
            if let Ok(report) =
                district_core::apply_command(&mut state, &content, &command, &mut rng, now)
            {
                events.extend(report.events);
            }
        }
        events.extend(district_core::tick(&mut state, &content, &mut rng, now));

        // Print notable events regardless of print_every.
        for envelope in &events {
            print_notable(&state, &envelope.event, now);
        }

        if state.meta.tick % print_every == 0 {
            print_status(&state);
        }
    }

    println!("{}", "-".repeat(80));
    println!("Done. Final state at tick {}:", state.meta.tick);
    print_status(&state);
    for entry in state.log.entries() {
        println!("  [{:?}] {}", entry.severity, entry.message);
    }

    if let Some(path) = &args.save {
        let file =
            std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
        serde_json::to_writer_pretty(file, &state).with_context(|| format!("writing {path}"))?;
        println!("State written to {path}.");
    }
    Ok(())
}

fn print_notable(state: &GameState, event: &Event, now: DateTime<Utc>) {
    let tick = state.meta.tick;
    match event {
        Event::LeveledUp { max_xp, .. } => {
            println!("*** LEVEL UP at tick={tick:04}: max xp now {max_xp} ***");
        }
        Event::WorldStateChanged { from, to } => {
            println!("*** WORLD STATE {from} -> {to} at {} ***", now.to_rfc3339());
        }
        Event::SeasonPassExpired => println!("*** SEASON PASS EXPIRED at tick={tick:04} ***"),
        _ => {}
    }
}

fn print_status(state: &GameState) {
    let p = &state.player;
    let district = state
        .current_district()
        .map_or("?", |d| d.name.as_str());
    let (crime, prosperity) = state
        .current_district()
        .map_or((0, 0), |d| (d.crime, d.prosperity));
    println!(
        "[tick={tick:04}]  {district:<18} crime={crime:3} prosperity={prosperity:3}  \
         crown={crown:6}  hp={hp:3}/{max_hp:<3}  energy={en:3}/{max_en:<3}  \
         xp={xp:3}/{max_xp:<3}  influence={influence}",
        tick = state.meta.tick,
        crown = p.crown,
        hp = p.health,
        max_hp = p.max_health,
        en = p.energy,
        max_en = p.max_energy,
        xp = p.xp,
        max_xp = p.max_xp,
        influence = p.influence,
    );
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            ticks,
            seed,
            state_file,
            content_dir,
            role,
            print_every,
            save,
        } => run(RunArgs {
            ticks,
            seed,
            state_file,
            content_dir,
            role,
            print_every,
            save,
        })?,
    }
    Ok(())
}
