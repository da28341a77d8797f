//! Main car executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging, parameters and modules
//!     - Main loop:
//!         - Telecommand processing: every pending command is applied to the car in the order
//!           it was recieved, publishing one snapshot per command
//!         - Idle republishing: until the first command arrives the initial snapshot is
//!           republished once per idle period
//!         - Cycle management
//!
//! # Modules
//!
//! All modules (e.g. `car_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::Utc;
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, error, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use car_lib::{
    car_ctrl::CarCtrl,
    car_node::CarNode,
    params::CarExecParams,
    tc_client::{TcClient, TcClientError},
    tm_server::TmServer
};
use comms_if::{net::NetParams, tc::TcResponse};
use util::{
    host,
    module::State,
    logger::{logger_init, parse_level},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingTcs}
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "car_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    let exec_params: CarExecParams = util::params::load("car_exec.toml")
        .wrap_err("Could not load exec params")?;

    // Initialise logger
    logger_init(
        parse_level(&exec_params.log_level).wrap_err("Invalid log level")?,
        &session
    ).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Car Model Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let net_params: NetParams = util::params::load("net.toml")
        .wrap_err("Could not load net params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let script = match args.len() {
        // If we have a single argument use it as the script path
        2 => {
            info!("Loading script from \"{}\"", &args[1]);

            let si = ScriptInterpreter::new(&args[1])
                .wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            Some(si)
        },
        1 => {
            info!("No script provided, remote control via the TcClient will be used\n");
            None
        },
        n => return Err(eyre!("Expected either zero or one argument, found {}", n - 1))
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut car_ctrl = CarCtrl::default();
    car_ctrl.init("car_ctrl.toml", &session)
        .wrap_err("Failed to initialise CarCtrl")?;
    info!("CarCtrl init complete");

    if !exec_params.cycle_period_fits(car_ctrl.params().idle_period_s) {
        return Err(eyre!(
            "The cycle period ({} s) must be positive and no longer than the idle period ({} s)",
            exec_params.cycle_period_s,
            car_ctrl.params().idle_period_s
        ))
    }

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let mut tc_source = match script {
        Some(si) => TcSource::Script(si),
        None => {
            let c = TcClient::new(&zmq_ctx, &net_params)
                .wrap_err("Failed to initialise the TcClient")?;
            info!("TcClient initialised");
            TcSource::Remote(c)
        }
    };

    let tm_server = TmServer::new(&zmq_ctx, &net_params)
        .wrap_err("Failed to initialise TmServer")?;
    info!("TmServer initialised");

    info!("Network initialisation complete");

    let mut node = CarNode::new(car_ctrl, tm_server)
        .wrap_err("Failed to create the car node")?;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let mut tc_client_connected = true;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- TELECOMMAND PROCESSING ----

        match tc_source {
            TcSource::Remote(ref client) => {
                // Get commands until none remain
                loop {
                    match client.receive_tc() {
                        Ok(Some(tc)) => {
                            tc_client_connected = true;

                            node.handle_tc(&tc, Utc::now());

                            if let Err(e) = client.send_response(TcResponse::Ok) {
                                warn!("Could not respond to TC: {}", e)
                            }
                        },
                        Ok(None) => break,
                        Err(TcClientError::NotConnected) => {
                            if tc_client_connected {
                                error!("Connection to the teleop console lost");
                                tc_client_connected = false;
                            }
                            break
                        },
                        // Invalid TCs have already been answered, carry on to the next one
                        Err(TcClientError::InvalidCommand(e)) => {
                            warn!("Rejected TC: {}", e);
                        },
                        Err(TcClientError::NonUtf8Message) => {
                            warn!("Rejected TC: not valid UTF-8");
                        },
                        Err(TcClientError::SendError(e)) => {
                            warn!("Could not respond to TC: {}", e);
                            break
                        },
                        Err(e) => return Err(e)
                            .wrap_err("An error occured while receiving TCs from the server")
                    }
                }
            },

            TcSource::Script(ref mut si) =>
                match si.get_pending_tcs() {
                    PendingTcs::None => (),
                    PendingTcs::Some(tc_vec) => {
                        for tc in tc_vec.iter() {
                            node.handle_tc(tc, Utc::now());
                        }
                    }
                    // Exit if end of script reached
                    PendingTcs::EndOfScript => {
                        info!("End of TC script reached, stopping");
                        break
                    }
                }
        };

        // ---- IDLE REPUBLISHING ----

        node.tick(Instant::now(), Utc::now());

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            )
        }
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    Ok(())
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    Remote(TcClient),
    Script(ScriptInterpreter)
}
