//! # Car teleoperation console
//!
//! Drives the car executable from the keyboard. Each line typed is parsed by [`keymap`] and the
//! resulting telecommands are sent to the car, printing the car's response.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod keymap;
mod tc_sender;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::eyre::{Result, WrapErr};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::path::PathBuf;
use structopt::StructOpt;

use comms_if::{
    net::{zmq, MonitoredSocketError, NetParams},
    tc::Tc
};

use keymap::{parse_line, Action, Magnitudes, DRIVE_KEYS};
use tc_sender::TcSender;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const PROMPT: &str = "Car $ ";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "car_teleop", about = "Drive the car model from the keyboard")]
struct Opt {
    /// Endpoint to bind the telecommand socket to, defaults to `tc_endpoint` from net.toml
    #[structopt(short, long)]
    endpoint: Option<String>,

    /// Forward speed sent by the drive keys, in meters/second
    #[structopt(short, long, default_value = "0.5")]
    speed: f64,

    /// Turn rate sent by the drive keys, in radians/second
    #[structopt(short, long, default_value = "1.0")]
    turn: f64,

    /// File to keep the console history in
    #[structopt(long, parse(from_os_str), default_value = "data/teleop_history.txt")]
    history: PathBuf
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("Unknown command \"{0}\", type help for a list of commands")]
    UnknownCommand(String),

    #[error("Expected a value after {0}")]
    MissingValue(&'static str),

    #[error("Invalid {0} \"{1}\", expected a positive number")]
    InvalidValue(&'static str, String),

    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not serialize the TC: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not send the TC: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve the response: {0}")]
    RecvError(zmq::Error),

    #[error("The car did not respond, is car_exec running?")]
    NoResponse,

    #[error("The car sent a response which was not valid UTF-8")]
    NonUtf8Response,

    #[error("Could not parse the response: {0}")]
    InvalidResponse(serde_json::Error)
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    let endpoint = match opt.endpoint {
        Some(e) => e,
        None => util::params::load::<NetParams>("net.toml")
            .wrap_err("No endpoint given and net.toml could not be loaded")?
            .tc_endpoint
    };

    let ctx = zmq::Context::new();
    let sender = TcSender::new(&ctx, &endpoint)
        .wrap_err("Failed to bind the telecommand socket")?;

    println!("Sending telecommands on {}", endpoint);

    let mut mags = Magnitudes {
        speed_ms: opt.speed,
        turn_rads: opt.turn
    };

    print_help(&mags);

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(&opt.history).is_err() {
        println!("No history detected");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                rl.add_history_entry(line.as_str()).ok();

                match parse_line(&line, &mags) {
                    Ok(Action::Drive(twists)) => {
                        for twist in twists {
                            send(&sender, &Tc::Drive(twist));
                        }
                    },
                    Ok(Action::Ping) => send(&sender, &Tc::Heartbeat),
                    Ok(Action::SetSpeed(v)) => {
                        mags.speed_ms = v;
                        println!("Speed set to {} m/s", v);
                    },
                    Ok(Action::SetTurn(v)) => {
                        mags.turn_rads = v;
                        println!("Turn rate set to {} rad/s", v);
                    },
                    Ok(Action::Help) => print_help(&mags),
                    Ok(Action::Quit) => break,
                    Ok(Action::Nothing) => (),
                    Err(e) => println!("{}", e)
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Unhandled Error: {:?}", err);
                break
            }
        }
    }

    if let Some(dir) = opt.history.parent() {
        std::fs::create_dir_all(dir).ok();
    }
    rl.save_history(&opt.history)
        .wrap_err("Could not save the console history")?;

    println!("Exiting...");

    Ok(())
}

fn send(sender: &TcSender, tc: &Tc) {
    match sender.send(tc) {
        Ok(r) => println!("{:?}", r),
        Err(e) => println!("{}", e)
    }
}

fn print_help(mags: &Magnitudes) {
    println!("Drive keys (speed {} m/s, turn {} rad/s):", mags.speed_ms, mags.turn_rads);
    for row in DRIVE_KEYS.chunks(3) {
        let line: Vec<String> = row
            .iter()
            .map(|(k, _, _, name)| format!("{} {:<14}", k, name))
            .collect();
        println!("    {}", line.join(""));
    }
    println!("Other commands: speed <m/s>, turn <rad/s>, ping, help, q");
}
