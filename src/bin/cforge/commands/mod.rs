mod particle;
mod tem;

use particle::{run_rod, run_sphere};
use tem::run_tem;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Sphere(args) => run_sphere(args, ctx),
        Command::Rod(args) => run_rod(args, ctx),
        Command::Tem(args) => run_tem(args, ctx),
    }
}
