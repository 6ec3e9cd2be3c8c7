//! Main head-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging, equipment, and all modules
//!     - Main loop:
//!         - Cycle bookkeeping and clock capture
//!         - Head manager processing:
//!             - Sensor acquisition
//!             - LOC behaviour state machine
//!             - Limb coordinator and servo mapper execution
//!         - Cycle rate maintenance
//!
//! The behaviour settings (LOC level, airway conditions, pulse) are
//! assembled once before the loop starts and are fixed for the run.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use head_lib::{
    data_store::DataStore,
    eqpt::Equipment,
    head_mgr::{HeadMgr, LocSettings},
    servo_ctrl::ServoCtrl,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use eqpt_if::sim::{SimAnalog, SimAudioPlayer, SimCamera, SimServoBoard, SimSolenoids};
use eqpt_if::ServoDriver;
use util::{
    logger::{logger_init, LevelFilter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.02;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

/// Number of servo driver boards fitted to the head.
const NUM_BOARDS: usize = 4;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("head_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("HAL Head Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD SETTINGS ----

    // The settings file stands in for the LCD menu: the operator fills it
    // in before powering the head.
    let settings = LocSettings::load("settings.toml")
        .wrap_err("Could not load the simulation settings")?;

    session.save("settings.json", &settings);

    info!("Simulation settings loaded");

    // ---- INITIALISE EQUIPMENT ----

    let servo_params = util::params::load("servo_ctrl.toml")
        .wrap_err("Could not load ServoCtrl params")?;

    let boards: Vec<Box<dyn ServoDriver>> = (0..NUM_BOARDS)
        .map(|_| Box::new(SimServoBoard::new()) as Box<dyn ServoDriver>)
        .collect();

    let mut eqpt = Equipment {
        servo: ServoCtrl::new(servo_params, boards),
        audio: Box::new(SimAudioPlayer::default()),
        camera: Box::new(SimCamera::new()),
        analog: Box::new(SimAnalog::new()),
        sols: Box::new(SimSolenoids::new()),
    };

    info!("Equipment initialised (simulated bench rig)");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    let mut head_mgr = HeadMgr::init(settings).wrap_err("Failed to initialise HeadMgr")?;
    info!("HeadMgr init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // Capture the clock once; every state machine below is keyed off
        // this value
        let now_ms = session::get_elapsed_ms();

        // ---- EQUIPMENT UPDATE ----

        eqpt.audio.update(now_ms);

        // ---- HEAD PROCESSING ----

        ds.head_status = head_mgr.step(now_ms, &mut eqpt);

        if ds.is_1_hz_cycle {
            info!(
                "[cycle {:>6}] {:?} LOC, phase: {}",
                ds.num_cycles,
                head_mgr.settings().level,
                ds.head_status.phase
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur_s = cycle_start_instant.elapsed().as_secs_f64();

        if cycle_dur_s > CYCLE_PERIOD_S {
            ds.num_consec_cycle_overruns += 1;
            warn!(
                "Cycle overran by {:.06} s ({} consecutive)",
                cycle_dur_s - CYCLE_PERIOD_S,
                ds.num_consec_cycle_overruns
            );
        } else {
            ds.num_consec_cycle_overruns = 0;
            thread::sleep(Duration::from_secs_f64(CYCLE_PERIOD_S - cycle_dur_s));
        }
    }
}
