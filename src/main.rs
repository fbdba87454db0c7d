//! Mimic Me! CLI
//!
//! Usage:
//!   mimicme --replay events.jsonl            # Replay a detector recording
//!   mimicme --demo --seed 7                  # Simulated player
//!   mimicme --serve                          # HTTP + WebSocket server
//!   mimicme --replay events.jsonl --json     # One JSON line per frame

use clap::Parser;
use std::process;
use tracing::{error, info};

use mimicme::core::{
    run_server, FaceDetector, GameDisplay, ScriptedDetector, SessionController, SimulatedPlayer,
    TerminalDisplay,
};
use mimicme::types::{DetectorEvent, FrameOutput, GameState};
use mimicme::{logging, GameConfig, MimicError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "mimicme",
    version = VERSION,
    about = "Mimic Me! - copy the emoji with your face",
    long_about = "Mimic Me! shows a target emoji and waits for the face classifier\n\
                  to report the same dominant emoji for 3 frames in a row.\n\n\
                  Modes:\n  \
                  --replay FILE  Replay recorded detector events (JSON lines)\n  \
                  --demo         Play against a simulated face\n  \
                  --serve        HTTP + WebSocket server for browser clients\n\n\
                  States:\n  \
                  INIT       - Waiting for the first face\n  \
                  GET_READY  - 30-frame countdown\n  \
                  MIMIC      - 100 frames to match the target\n  \
                  SUCCESS    - Matched, score +1\n  \
                  FAILURE    - Out of time"
)]
struct Args {
    /// Replay detector events from a JSON-lines file
    #[arg(short, long)]
    replay: Option<String>,

    /// Play against a simulated face
    #[arg(short, long)]
    demo: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// JSON config file (sensing_frames, animation_frames, confirm_frames, seed)
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for target selection
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate in demo mode
    #[arg(long, default_value = "1000")]
    frames: u64,

    /// Longest simulated reaction time, in frames
    #[arg(long, default_value = "120")]
    reaction: u32,

    /// Output one JSON object per processed frame
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-frame results and debug logs
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Config error: {}", e);
            process::exit(2);
        }
    };

    let result = if args.serve {
        run_serve(&args, config).await
    } else if let Some(ref path) = args.replay {
        run_replay(path, &args, config)
            .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })
    } else {
        if !args.demo {
            info!("no mode given, running the demo");
        }
        run_demo(&args, config);
        Ok(())
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Defaults, then the config file, then CLI flags
fn load_config(args: &Args) -> Result<GameConfig, MimicError> {
    let mut config = match args.config {
        Some(ref path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Replay a detector recording through a session
fn run_replay(path: &str, args: &Args, config: GameConfig) -> Result<(), MimicError> {
    let detector = ScriptedDetector::load(path)?;
    let mut session = SessionController::new(detector, terminal_display(args), config);

    print_header("Replay", args);
    session.start();

    while let Some(event) = session.detector_mut().poll() {
        if let Some(output) = session.handle_event(event) {
            print_output(&output, args);
        }
    }

    print_summary(&session, args);
    Ok(())
}

/// Simulated player against a seeded game
fn run_demo(args: &Args, config: GameConfig) {
    let seed = config.seed.unwrap_or(0);
    let mut player = SimulatedPlayer::new(seed.wrapping_add(1), args.reaction);
    let mut session = SessionController::new(ScriptedDetector::default(), terminal_display(args), config);

    print_header("Demo", args);
    session.start();
    session.handle_event(DetectorEvent::CameraGranted);
    session.handle_event(DetectorEvent::Ready);

    for i in 0..args.frames {
        let face = player.next_face(session.state(), session.engine().target());
        let timestamp = i as f64 / 15.0;
        if let Some(output) = session.on_frame_result(&[face], timestamp) {
            print_output(&output, args);
        }
    }

    session.stop();
    print_summary(&session, args);
}

/// Terminal output, silent while stdout carries JSON
fn terminal_display(args: &Args) -> TerminalDisplay {
    if args.json {
        TerminalDisplay::silent()
    } else {
        TerminalDisplay::new(args.no_color, args.verbose)
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("Mimic Me! v{} - server", VERSION);
    println!();
    run_server(&args.addr, config).await
}

/// Print header
fn print_header(mode: &str, args: &Args) {
    if args.json {
        return;
    }
    println!("========================================");
    println!("  Mimic Me! v{} - {}", VERSION, mode);
    println!("========================================");
    println!();
}

/// Print one frame's output; plain mode only reports state changes
fn print_output(output: &FrameOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("could not serialize frame output: {}", e),
        }
    } else if args.verbose {
        if args.no_color {
            println!("{}", output.to_parseable_string());
        } else {
            println!("{}", output.to_terminal_string());
        }
    } else if output.reason.is_transition() {
        print_state_message(output, args.no_color);
    }
}

/// Print state transition messages
fn print_state_message(output: &FrameOutput, no_color: bool) {
    let (color, reset) = if no_color {
        ("", "")
    } else {
        (output.state.color_code(), GameState::color_reset())
    };
    match output.state {
        GameState::Mimic => println!("{}  → frame {}: mimic the target!{}", color, output.frame, reset),
        GameState::Success => println!("{}  ✓ frame {}: matched{}", color, output.frame, reset),
        GameState::Failure => println!("{}  ✗ frame {}: out of time{}", color, output.frame, reset),
        GameState::GetReady | GameState::Init => {}
    }
}

/// Final score
fn print_summary<D: FaceDetector, V: GameDisplay>(session: &SessionController<D, V>, args: &Args) {
    if args.json {
        return;
    }
    let score = session.score();
    println!();
    println!(
        "Session ended. Frames: {} | {} | {:.0}% correct",
        session.frame(),
        score,
        score.ratio() * 100.0
    );
}
