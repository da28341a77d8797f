//! # Car script interpreter module
//!
//! This module provides an interpreter for car command scripts, allowing
//! telecommands to be replayed at fixed times instead of being received over
//! the network.
//!
//! A script is a list of `<time_s>: <tc json>;` entries, for example:
//!
//! ```text
//! 0.5: {"Drive":{"linear":{"x":1.0,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":0.0}}};
//! 2.0: "Heartbeat";
//! ```
//!
//! Lines not matching this format (such as `#` comments) are ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug, Clone)]
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
#[derive(Debug)]
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

/// The result of polling the interpreter.
#[derive(Debug, PartialEq)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut interp = Self::from_str(&script)?;
        interp.script_path = Some(path);

        Ok(interp)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

        for cap in re.captures_iter(script) {
            // Groups 1 and 3 always participate in a match
            let (time_str, tc_str) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(c)) => (t.as_str(), c.as_str()),
                _ => continue
            };

            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = Tc::from_json(tc_str.trim())
                .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs which are due at the current session time.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        self.get_pending_tcs_at(get_elapsed_seconds())
    }

    /// Return the TCs which are due at `current_time_s`, in script order.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s >= current_time_s {
                break;
            }
            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        if tc_vec.is_empty() {
            PendingTcs::None
        }
        else {
            PendingTcs::Some(tc_vec)
        }
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }

    /// The path the script was loaded from, if any.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::car_ctrl::Twist;

    const SCRIPT: &str = r#"
# Drive forward, turn, then stop
0.5: {"Drive":{"linear":{"x":1.0,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":0.0}}};
1.0: {"Drive":{"linear":{"x":1.0,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":1.0}}};
1.0: "Heartbeat";
3.0: {"Drive":{"linear":{"x":0.0,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":0.0}}};
"#;

    #[test]
    fn test_parse_script() {
        let interp = ScriptInterpreter::from_str(SCRIPT).unwrap();
        assert_eq!(interp.get_num_tcs(), 4);
        assert_eq!(interp.get_duration(), 3.0);
        assert!(interp.script_path().is_none());
    }

    #[test]
    fn test_pending_tcs() {
        let mut interp = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(interp.get_pending_tcs_at(0.1), PendingTcs::None);
        assert_eq!(
            interp.get_pending_tcs_at(0.6),
            PendingTcs::Some(vec![Tc::Drive(Twist::planar(1.0, 0.0))])
        );
        assert_eq!(
            interp.get_pending_tcs_at(2.0),
            PendingTcs::Some(vec![
                Tc::Drive(Twist::planar(1.0, 1.0)),
                Tc::Heartbeat
            ])
        );
        assert_eq!(
            interp.get_pending_tcs_at(10.0),
            PendingTcs::Some(vec![Tc::Drive(Twist::stop())])
        );
        assert_eq!(interp.get_pending_tcs_at(11.0), PendingTcs::EndOfScript);
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            ScriptInterpreter::from_str("# nothing to see"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_str("1.0: {\"Fly\": true};"),
            Err(ScriptError::InvalidTc(_, TcParseError::InvalidJson(_)))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/no/such/script.cs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
