use dotenv::dotenv;
use make_inventory::pagination::{IncrementalList, ScrollMetrics};
use make_inventory::render::{DisplayNode, Renderer};
use make_inventory::search::{InventoryFilters, SearchOptions, Searcher};
use make_inventory::MakeClient;
use std::env;

fn print_row(node: &DisplayNode) {
    match node {
        DisplayNode::Header(_) => println!("Name | Type | Location | Quantity"),
        DisplayNode::Catalog(row) => {
            let kind = match (&row.icon, &row.kit_contents) {
                (Some(icon), _) => icon.title().to_string(),
                (None, Some(contents)) => format!("Kit ({} items)", contents.len()),
                (None, None) => String::new(),
            };
            let location = row.location.as_ref().map(|l| l.room.as_str()).unwrap_or("");
            let quantity = row.quantity.as_ref().map(|q| q.to_string()).unwrap_or_default();
            println!("{} | {} | {} | {}", row.name, kind, location, quantity);
            for line in &row.details {
                println!("    {}", line);
            }
        }
        DisplayNode::Editable(row) => println!("{} | {}", row.name, row.quantity),
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let make_url = env::var("MAKE_API_URL").expect("MAKE_API_URL must be set");
    let query = env::args().nth(1).unwrap_or_default();
    let room = env::var("MAKE_ROOM").unwrap_or_default();

    let make = MakeClient::new(&make_url);

    println!("Fetching inventory from {}", make.url);
    let inventory = make.inventory().get_inventory().await?;
    println!("{} items in the catalog", inventory.len());

    let filters = InventoryFilters::none().in_stock().with_room(&room);
    let mut searcher = Searcher::new(SearchOptions::default());
    let results = searcher.search(&query, &inventory, &filters);
    println!("{} matches for {:?}\n", results.len(), query);

    let renderer = Renderer::catalog(false);
    let rows = renderer.render_all(results.iter().map(|r| r.item));

    let mut list = IncrementalList::new(
        make.options.page_size,
        make.options.scroll_threshold,
    );
    list.reset(renderer.header(), rows);
    if let Some(header) = list.header() {
        print_row(header);
    }
    list.rendered().iter().for_each(print_row);

    // Pretend the user keeps scrolling to the bottom
    while !list.is_exhausted() {
        let bottom = ScrollMetrics { offset: 0.0, viewport: 100.0, content: 100.0 };
        list.on_scroll(bottom).iter().for_each(print_row);
    }

    println!("\nInventory search example completed");

    Ok(())
}
