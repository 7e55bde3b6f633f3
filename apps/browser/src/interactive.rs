//! Line-driven browsing session: stdin commands in, coordinator events out.

use anyhow::{Context, Result};
use catalog_core::{CoordinatorEvent, FilterCoordinator};
use shared::domain::FacetName;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{
        broadcast::{self, error::RecvError},
        mpsc,
    },
};
use tracing::warn;

use crate::{
    commands::{parse_command, Command, HELP},
    render::{describe, Screen},
};

pub async fn run(coordinator: FilterCoordinator) -> Result<()> {
    let screen = Screen::capture(&coordinator);
    let events = coordinator.subscribe_events();
    let (action_tx, action_rx) = mpsc::channel(32);
    let (show_tx, show_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(coordinator.run(action_rx));
    let printer = tokio::spawn(print_events(screen, events, show_rx));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show(target)) => {
                let _ = show_tx.send(target);
            }
            Ok(Command::Action(action)) => {
                if action_tx.send(action).await.is_err() {
                    warn!("coordinator stopped; ending session");
                    break;
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    drop(action_tx);
    let mut coordinator = worker.await.context("coordinator task failed")?;
    coordinator.settle().await;
    drop(coordinator);
    drop(show_tx);
    printer.await.context("event printer failed")?;
    Ok(())
}

async fn print_events(
    mut screen: Screen,
    mut events: broadcast::Receiver<CoordinatorEvent>,
    mut show_rx: mpsc::UnboundedReceiver<Option<FacetName>>,
) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    println!("{}", describe(&event));
                    screen.apply(&event);
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event printer fell behind"),
                Err(RecvError::Closed) => break,
            },
            Some(target) = show_rx.recv() => println!("{}", screen.render(target)),
        }
    }
}
