//! Random opponent generation

use crate::config::RosterConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use wrestler_core::Wrestler;

/// Default pool of opponent names, each listed once so every name is equally likely
pub const DEFAULT_CANDIDATE_NAMES: &[&str] = &[
    "John Cena",
    "Roman Reigns",
    "Seth Rollins",
    "Kevin Owens",
    "Sami Zayn",
    "AJ Styles",
    "Randy Orton",
    "Drew McIntyre",
    "Bobby Lashley",
    "Big E",
    "Kofi Kingston",
    "Xavier Woods",
    "The Miz",
    "Damian Priest",
    "Finn Bálor",
    "Hulk Hogan",
    "Stone Cold Steve Austin",
    "The Rock",
    "The Undertaker",
    "Triple H",
    "Shawn Michaels",
    "Bret Hart",
    "Chris Jericho",
    "Eddie Guerrero",
    "Rey Mysterio",
    "Kurt Angle",
    "Chris Benoit",
    "Rob Van Dam",
    "Booker T",
    "Goldberg",
    "Sting",
    "Diamond Dallas Page",
    "Ric Flair",
    "Arn Anderson",
    "Lex Luger",
    "Scott Hall",
    "Kevin Nash",
    "Hollywood Hogan",
    "Buff Bagwell",
    "Scott Steiner",
    "Samoa Joe",
    "Bobby Roode",
    "James Storm",
    "Eric Young",
    "Austin Aries",
    "Ethan Carter III",
    "Matt Hardy",
    "Jeff Hardy",
    "CM Punk",
    "Bryan Danielson",
    "Adam Cole",
    "Kenny Omega",
    "MJF",
    "Darby Allin",
    "Jungle Boy",
    "Sammy Guevara",
    "Orange Cassidy",
    "The Young Bucks",
    "FTR",
    "Jon Moxley",
    "Hangman Adam Page",
    "PAC",
    "Cesaro",
    "The Briscoes",
    "Christopher Daniels",
    "Frankie Kazarian",
    "Walter",
    "Ilja Dragunov",
    "Jordan Devlin",
    "Travis Banks",
    "David Starr",
    "Zack Sabre Jr.",
    "Will Ospreay",
    "Marty Scurll",
    "KUSHIDA",
    "Taiji Ishimori",
];

/// Generate a random opponent: a name from the candidate pool at a random level
pub fn generate_opponent<R: Rng>(config: &RosterConfig, rng: &mut R) -> Wrestler {
    let name = config
        .candidate_names
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| DEFAULT_CANDIDATE_NAMES[0].to_string());

    let (lo, hi) = (
        config.opponent_level_min.max(1),
        config.opponent_level_max.max(config.opponent_level_min.max(1)),
    );
    let level = rng.gen_range(lo..=hi);

    debug!(name = %name, level, "generated opponent");
    Wrestler::new(name, level)
}
