//  TESTS.rs
//    by Lut99
//
//  Created:
//    02 Jun 2025, 14:02:19
//  Last edited:
//    17 Jun 2025, 10:51:36
//  Auto updated?
//    Yes
//
//  Description:
//!   Contains some common test functions.
//

#![allow(unused)]

use crate::fa::{FARule, NFARulebook};
use crate::pda::{DPDARulebook, NPDARulebook, PDARule};


/***** LIBRARY *****/
/// Sets up a logger if wanted.
#[cfg(feature = "log")]
pub fn setup_logger() {
    use humanlog::{DebugMode, HumanLogger};

    // Check if the envs tell us to
    if let Ok(logger) = std::env::var("LOGGER") {
        if logger == "1" || logger == "true" {
            // Create the logger
            if let Err(err) = HumanLogger::terminal(DebugMode::Full).init() {
                eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
            }
        }
    }
}



/// Makes an [`NFARulebook`] that, with accept state `4`, accepts strings whose third-to-last
/// character is a `b`.
pub fn third_from_last_b() -> NFARulebook<u32, char> {
    NFARulebook::new([
        FARule::new(1, 'a', 1),
        FARule::new(1, 'b', 1),
        FARule::new(1, 'b', 2),
        FARule::new(2, 'a', 3),
        FARule::new(2, 'b', 3),
        FARule::new(3, 'a', 4),
        FARule::new(3, 'b', 4),
    ])
}

/// Makes an [`NFARulebook`] with free moves and a cycle, used to test the subset construction.
pub fn simulation_rulebook() -> NFARulebook<u32, char> {
    NFARulebook::new([
        FARule::new(1, 'a', 1),
        FARule::new(1, 'a', 2),
        FARule::free(1, 2),
        FARule::new(2, 'b', 3),
        FARule::new(3, 'b', 1),
        FARule::free(3, 2),
    ])
}



/// Makes a [`DPDARulebook`] that, with accept state `1` and bottom `$`, accepts balanced
/// parentheses.
pub fn balanced_parens() -> DPDARulebook<u32, char> {
    DPDARulebook::new([
        PDARule::new(1, '(', 2, '$', ['b', '$']),
        PDARule::new(2, '(', 2, 'b', ['b', 'b']),
        PDARule::new(2, ')', 2, 'b', []),
        PDARule::free(2, 1, '$', ['$']),
    ])
}

/// Makes an [`NPDARulebook`] that, with accept state `3` and bottom `$`, accepts even-length
/// palindromes over `a` and `b`.
pub fn palindromes() -> NPDARulebook<u32, char> {
    NPDARulebook::new([
        PDARule::new(1, 'a', 1, '$', ['a', '$']),
        PDARule::new(1, 'a', 1, 'a', ['a', 'a']),
        PDARule::new(1, 'a', 1, 'b', ['a', 'b']),
        PDARule::new(1, 'b', 1, '$', ['b', '$']),
        PDARule::new(1, 'b', 1, 'a', ['b', 'a']),
        PDARule::new(1, 'b', 1, 'b', ['b', 'b']),
        PDARule::free(1, 2, '$', ['$']),
        PDARule::free(1, 2, 'a', ['a']),
        PDARule::free(1, 2, 'b', ['b']),
        PDARule::new(2, 'a', 2, 'a', []),
        PDARule::new(2, 'b', 2, 'b', []),
        PDARule::free(2, 3, '$', ['$']),
    ])
}
