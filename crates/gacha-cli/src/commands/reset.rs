use std::path::Path;

pub fn run(dir: &Path, seed: Option<u64>, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("reset erases all progress, pass --yes to confirm".into());
    }
    let mut game = super::open_game(dir, seed)?;
    game.reset().map_err(|e| e.to_string())?;
    println!("  Game reset in {}/", dir.display());
    Ok(())
}
