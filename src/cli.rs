// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::ValueEnum;
use recollect::Grade;
use recollect::error::Fallible;

use crate::cmd::Input;
use crate::cmd::new::new_card;
use crate::cmd::preview::preview_card;
use crate::cmd::review::review_card;
use crate::cmd::status::card_status;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print the state of a card that has never been reviewed.
    New,
    /// Grade a card and print its next state.
    Review {
        /// The grade.
        #[arg(long, value_enum)]
        grade: GradeArg,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the wait until the next review for each grade.
    Preview {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the card's status, due flag, and current retrievability.
    Status {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Path to the card state, as JSON. Read from stdin if omitted.
    #[arg(long)]
    card: Option<PathBuf>,
    /// Path to a TOML parameter file. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// The current time, in milliseconds since the Unix epoch. The system
    /// clock is used if omitted.
    #[arg(long, allow_hyphen_values = true)]
    now: Option<i64>,
}

impl From<InputArgs> for Input {
    fn from(args: InputArgs) -> Self {
        Input {
            card: args.card,
            config: args.config,
            now: args.now,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
enum GradeArg {
    /// Forgot the answer.
    Again,
    /// Recalled with serious difficulty.
    Hard,
    /// Recalled with some effort.
    Good,
    /// Recalled effortlessly.
    Easy,
}

impl GradeArg {
    fn grade(self) -> Grade {
        match self {
            GradeArg::Again => Grade::Again,
            GradeArg::Hard => Grade::Hard,
            GradeArg::Good => Grade::Good,
            GradeArg::Easy => Grade::Easy,
        }
    }
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let output: String = match cli {
        Command::New => new_card()?,
        Command::Review { grade, input } => review_card(&input.into(), grade.grade())?,
        Command::Preview { input } => preview_card(&input.into())?,
        Command::Status { input } => card_status(&input.into())?,
    };
    println!("{output}");
    Ok(())
}
