//! # CARDSWAP Demo
//!
//! Runs a carousel headless on the simulated host and prints the card order
//! after every rotation. A scripted hover pauses the deck mid-run.
//!
//! By default the host is stepped at 60 Hz of simulated time. With
//! `--realtime` each frame advances it by the wall time actually elapsed.
//!
//! ## Usage
//!
//! ```bash
//! cardswap_demo --config demos/cardswap.toml --cards 4 --duration 20
//! cardswap_demo --hover 6.0 8.5 --realtime
//! RUST_LOG=cardswap=debug cardswap_demo
//! ```

use std::time::{Duration, Instant};

use cardswap::{init_card_swap, HostEvent, SimEngine, SimTimers};
use cardswap_core::{CardId, CardSwapOptions};
use tracing_subscriber::EnvFilter;

/// Simulated frame length (60 Hz).
const FRAME: Duration = Duration::from_micros(16_667);

const DEFAULT_DURATION: Duration = Duration::from_secs(20);
const DEFAULT_HOVER: (Duration, Duration) = (Duration::from_secs(6), Duration::from_millis(8500));

fn print_usage() {
    println!("Usage: cardswap_demo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>        TOML option file");
    println!("  -n, --cards <NUM>          Number of cards (default: 4)");
    println!("  -d, --duration <SECS>      Seconds to run (default: 20)");
    println!("      --hover <FROM> <TO>    Hover window in seconds (default: 6 8.5)");
    println!("      --realtime             Advance by elapsed wall time");
    println!("  -h, --help                 Show this help");
}

/// Parses a seconds argument. Anything that is not a finite, non-negative
/// number of seconds yields `fallback`.
fn parse_seconds(arg: &str, fallback: Duration) -> Duration {
    arg.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(fallback)
}

fn format_order(order: impl Iterator<Item = CardId>) -> String {
    order.map(|c| c.0.to_string()).collect::<Vec<_>>().join(" ")
}

#[allow(clippy::too_many_lines)]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut cards = 4usize;
    let mut total = DEFAULT_DURATION;
    let mut hover = DEFAULT_HOVER;
    let mut realtime = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--cards" | "-n" => {
                if i + 1 < args.len() {
                    cards = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--duration" | "-d" => {
                if i + 1 < args.len() {
                    total = parse_seconds(&args[i + 1], DEFAULT_DURATION);
                    i += 1;
                }
            }
            "--hover" => {
                if i + 2 < args.len() {
                    hover = (
                        parse_seconds(&args[i + 1], DEFAULT_HOVER.0),
                        parse_seconds(&args[i + 2], DEFAULT_HOVER.1),
                    );
                    i += 2;
                }
            }
            "--realtime" => realtime = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {}
        }
        i += 1;
    }

    let options = match config_path {
        Some(path) => match CardSwapOptions::from_toml_file(&path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("   ✗ {e}");
                std::process::exit(1);
            }
        },
        None => CardSwapOptions::new(),
    };

    let deck: Vec<CardId> = (0..cards).filter_map(|i| u32::try_from(i).ok().map(CardId)).collect();
    let Some(mut carousel) = init_card_swap(
        Some(&deck),
        Some(SimEngine::new(cards)),
        SimTimers::new(),
        &options,
    ) else {
        println!("Nothing to animate ({cards} cards).");
        return;
    };

    let config = *carousel.config();
    println!("┌─ CARDSWAP ──────────────────────────────────────────────┐");
    println!("│ Cards:          {cards}");
    println!("│ Easing:         {:?} ({})", config.easing, config.timing.ease);
    println!("│ Delay:          {} ms", config.delay.as_millis());
    println!("│ Pause on hover: {}", config.pause_on_hover);
    println!(
        "│ Hover window:   {:.1}s .. {:.1}s",
        hover.0.as_secs_f64(),
        hover.1.as_secs_f64()
    );
    println!("└─────────────────────────────────────────────────────────┘");
    println!("  t=  0.00s  order: {}", format_order(carousel.queue().order()));

    let mut elapsed = Duration::ZERO;
    let mut frames = 0u64;
    let mut hovering = false;
    let mut rotations = carousel.queue().rotations();
    let mut last_frame = Instant::now();

    while elapsed < total {
        let should_hover = elapsed >= hover.0 && elapsed < hover.1;
        if should_hover != hovering {
            hovering = should_hover;
            let event = if hovering {
                HostEvent::PointerEnter
            } else {
                HostEvent::PointerLeave
            };
            carousel.handle(event);
            println!(
                "  t={:>6.2}s  {}",
                elapsed.as_secs_f64(),
                if hovering { "hover: paused" } else { "hover: resumed" }
            );
        }

        let step = if realtime {
            std::thread::sleep(FRAME.saturating_sub(last_frame.elapsed()));
            let now = Instant::now();
            let wall = now.duration_since(last_frame);
            last_frame = now;
            wall
        } else {
            FRAME
        };
        let dt = step.min(total - elapsed);

        carousel.advance(dt);
        elapsed += dt;
        frames += 1;

        if carousel.queue().rotations() != rotations {
            rotations = carousel.queue().rotations();
            println!(
                "  t={:>6.2}s  order: {}",
                elapsed.as_secs_f64(),
                format_order(carousel.queue().order())
            );
        }
    }

    carousel.dispose();

    println!();
    println!(
        "Done: {} rotations in {:.1}s, {} frames.",
        rotations,
        elapsed.as_secs_f64(),
        frames
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2.5", DEFAULT_DURATION), Duration::from_millis(2500));
        assert_eq!(parse_seconds("0", DEFAULT_DURATION), Duration::ZERO);
    }

    #[test]
    fn test_unrepresentable_seconds_fall_back() {
        for arg in ["inf", "1e30", "-1", "NaN", "soon"] {
            assert_eq!(parse_seconds(arg, DEFAULT_DURATION), DEFAULT_DURATION, "{arg}");
        }
    }
}
