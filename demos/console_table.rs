//! Console blackjack table example.
//!
//! Plays the role of the chat transport: the table is printed to stdout and
//! each input line is delivered as a reaction.

use std::time::Duration;

use async_trait::async_trait;
use bjbot::{
    Card, Control, GameState, GameView, Outcome, PlayerId, Presenter, ReactionEvent,
    RouteOutcome, SurfaceError, SurfaceId, TableActor, TableOptions,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const SURFACE: SurfaceId = SurfaceId(1);
const PLAYER: PlayerId = PlayerId(1);

struct Console;

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "Empty".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_totals(totals: &[u8]) -> String {
    match totals {
        [] => "bust".to_string(),
        _ => totals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/"),
    }
}

fn print_view(view: &GameView) {
    let title = if view.state == GameState::Dealing {
        "Blackjack: Dealing..."
    } else {
        "Blackjack:"
    };
    println!("{title}");
    println!(
        "  Your hand:    {} ({})",
        format_cards(&view.player_cards),
        format_totals(&view.player_totals)
    );
    println!(
        "  Dealer's hand: {} ({})",
        format_cards(&view.dealer_cards),
        format_totals(&view.dealer_totals)
    );
    match view.outcome {
        Some(Outcome::Win) => println!("You won! Play again?"),
        Some(Outcome::Loss) => println!("You lost... Play again?"),
        _ => {}
    }
}

#[async_trait]
impl Presenter for Console {
    async fn render_surface(&mut self, view: &GameView) -> Result<SurfaceId, SurfaceError> {
        print_view(view);
        Ok(SURFACE)
    }

    async fn update_surface(
        &mut self,
        _surface: SurfaceId,
        view: &GameView,
    ) -> Result<(), SurfaceError> {
        print_view(view);
        Ok(())
    }

    async fn set_controls(
        &mut self,
        _surface: SurfaceId,
        controls: &[Control],
    ) -> Result<(), SurfaceError> {
        if !controls.is_empty() {
            let names: Vec<String> = controls.iter().map(|c| format!("{c:?}")).collect();
            println!("Controls: {}", names.join(", "));
        }
        Ok(())
    }

    async fn notify_input_rejected(
        &mut self,
        _surface: SurfaceId,
        _actor: PlayerId,
    ) -> Result<(), SurfaceError> {
        println!("(that had no effect)");
        Ok(())
    }

    async fn close_surface(
        &mut self,
        _surface: SurfaceId,
        _view: &GameView,
        outcome: Outcome,
    ) -> Result<(), SurfaceError> {
        match outcome {
            Outcome::TimedOut => println!("Game timed out: you took too long to make an input."),
            Outcome::Aborted => println!("Game aborted."),
            _ => println!("Game stopped. Thanks for playing!"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Blackjack console example");
    println!("Type hit, stand, restart or cancel (q to quit).");

    let options = TableOptions::default().with_idle_timeout(Some(Duration::from_secs(60)));
    let table = TableActor::spawn(options, Console);
    table.request_start(PLAYER).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "q" {
            break;
        }
        if line == "start" {
            if let Err(err) = table.request_start(PLAYER).await {
                println!("Sorry, {err}.");
            }
            continue;
        }

        let event = ReactionEvent::new(SURFACE, PLAYER, Control::from_symbol(line));
        if table.dispatch(event).await? == RouteOutcome::NotThisSurface {
            println!("No game is running. Type start to play.");
        }
    }

    table.shutdown().await?;
    println!("Goodbye.");
    Ok(())
}
