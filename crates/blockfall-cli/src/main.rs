mod command;
mod logger;
mod music;
mod schema;
mod score_store;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
