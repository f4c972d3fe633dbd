use chrono::{Local, Utc};
use dotenv::dotenv;
use make_inventory::workshops::{partition_workshops, schedule_cards, CardAction, WorkshopCard, WorkshopSchedule};
use make_inventory::MakeClient;
use std::env;

fn print_card(card: &WorkshopCard) {
    println!("{} ({} {})", card.title, card.date, card.time_range);
    println!("    Instructors: {}", card.instructors);
    println!("    {}", card.signups);
    if let Some(position) = card.position {
        println!("    You are #{} on the list", position);
    }
    if card.full && card.action == CardAction::Rsvp {
        println!("    Full, RSVPing joins the waitlist");
    }
    println!("    [{}]", card.action.label());
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let make_url = env::var("MAKE_API_URL").expect("MAKE_API_URL must be set");
    let user_uuid = env::var("MAKE_USER_UUID").ok();

    let workshops = MakeClient::new(&make_url).workshops();
    let listed = workshops.get_workshops_for_user(user_uuid.as_deref()).await?;

    let schedule = partition_workshops(&listed, Utc::now());
    let (upcoming, previous) = schedule_cards(&schedule, &Local);

    println!("Upcoming workshops");
    if upcoming.is_empty() {
        println!("{}", WorkshopSchedule::NO_UPCOMING);
    }
    upcoming.iter().for_each(print_card);

    println!("\nPrevious workshops");
    previous.iter().for_each(print_card);

    // RSVP to the first open workshop when a user and MAKE_RSVP=1 are given
    if let (Some(user), Ok("1")) = (user_uuid.as_deref(), env::var("MAKE_RSVP").as_deref()) {
        if let Some(card) = upcoming.iter().find(|c| c.action == CardAction::Rsvp) {
            println!("\nRSVPing to {}", card.title);
            match workshops.rsvp(&card.uuid, user).await {
                Ok(()) => println!("RSVP confirmed"),
                Err(e) => println!("RSVP failed: {}", e),
            }
        }
    }

    println!("\nWorkshops example completed");

    Ok(())
}
