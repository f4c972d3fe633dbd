use dotenv::dotenv;
use make_inventory::auth::FileKeyStore;
use make_inventory::editor::{FieldKey, LocationField};
use make_inventory::search::InventoryFilters;
use make_inventory::MakeClient;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let make_url = env::var("MAKE_API_URL").expect("MAKE_API_URL must be set");
    let api_key = env::var("MAKE_API_KEY").ok();
    let key_file = env::var("MAKE_KEY_FILE").unwrap_or_else(|_| ".make_key.json".to_string());

    let make = MakeClient::new(&make_url);

    // Validate the key, falling back to the one saved last time
    let auth = make.auth(Arc::new(FileKeyStore::new(key_file)));
    let key = auth.authenticate(api_key.as_deref()).await?;
    println!("Authenticated with scopes {:?}", key.scopes.scopes);

    let mut editor = make.with_api_key(&key.api_key).editor();
    let first_page = editor.load().await?.len();
    println!("Loaded {} items, showing {}", editor.store().inventory().len(), first_page);

    // Create a scratch item, edit it, and let autosave write it
    let uuid = editor.start_new().await.uuid.clone();
    println!("\nCreating {}", uuid);
    for (field, value) in [
        (FieldKey::Name, "Demo Clamp"),
        (FieldKey::Role, "T"),
        (FieldKey::AccessType, "1"),
        (FieldKey::QuantityTotal, "2"),
        (FieldKey::location(0, LocationField::Room), "Main"),
        (FieldKey::location(0, LocationField::Container), "Demo Shelf"),
    ] {
        let outcome = editor.on_field_change(field, value);
        println!("{:?} = {:?}: {:?}", field, value, outcome);
    }

    if let Some(status) = editor.autosave().await {
        println!("Save status: {} ({:?})", status, status);
    }

    let found = editor.search("demo clamp", InventoryFilters::none()).len();
    println!("{} rows match \"demo clamp\"", found);

    // Clean up
    let outcome = editor.delete_item(&uuid, "delete").await;
    println!("Delete: {:?}", outcome);

    println!("\nInventory editor example completed");

    Ok(())
}
