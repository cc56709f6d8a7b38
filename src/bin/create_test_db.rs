use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::Duration;

use grocery_ledger::{
    EntityName,
    basket::{Basket, NewItem, create_basket},
    category::create_category,
    initialize_db, local_today,
    producer::create_producer,
    product::{NewProduct, create_product, create_variant},
    shop::{NewShop, create_shop},
};

/// A utility for creating a demo database of grocery shopping.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many weeks of baskets to generate, ending today.
    #[arg(long, default_value_t = 12)]
    weeks: u32,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating shops, categories and producers...");

    let corner_grocer = create_shop(
        NewShop {
            name: EntityName::new("Corner Grocer")?,
            address: Some("12 Main St".to_owned()),
        },
        &conn,
    )?;
    let super_mart = create_shop(NewShop::named(EntityName::new("Super Mart")?), &conn)?;

    let dairy = create_category(EntityName::new("Dairy")?, &conn)?;
    let bakery = create_category(EntityName::new("Bakery")?, &conn)?;
    let produce = create_category(EntityName::new("Fruit & Veg")?, &conn)?;
    let household = create_category(EntityName::new("Household")?, &conn)?;

    let green_farm = create_producer(EntityName::new("Green Farm")?, &conn)?;
    let village_bakers = create_producer(EntityName::new("Village Bakers")?, &conn)?;

    println!("Creating products...");

    let milk = create_product(
        NewProduct::named(EntityName::new("Milk")?)
            .category_id(Some(dairy.id))
            .producer_id(Some(green_farm.id)),
        &conn,
    )?;
    let milk_2l = create_variant(milk.id, EntityName::new("2 L")?, &conn)?;
    let cheese = create_product(
        NewProduct::named(EntityName::new("Cheese")?)
            .category_id(Some(dairy.id))
            .producer_id(Some(green_farm.id)),
        &conn,
    )?;
    let bread = create_product(
        NewProduct::named(EntityName::new("Sourdough")?)
            .category_id(Some(bakery.id))
            .producer_id(Some(village_bakers.id)),
        &conn,
    )?;
    let apples = create_product(
        NewProduct::named(EntityName::new("Apples")?).category_id(Some(produce.id)),
        &conn,
    )?;
    let dish_soap = create_product(
        NewProduct::named(EntityName::new("Dish Soap")?).category_id(Some(household.id)),
        &conn,
    )?;

    println!("Creating baskets...");

    let today = local_today(None);

    for week in 0..args.weeks {
        let week = i64::from(week);
        let weekly_shop = today - Duration::weeks(week);

        create_basket(
            Basket::build(weekly_shop)
                .shop_id(Some(super_mart.id))
                .note("Weekly shop")
                .item(NewItem::new(milk.id, 429).variant_id(Some(milk_2l.id)))
                .item(NewItem::new(bread.id, 650 + 10 * (week % 3)))
                .item(NewItem::new(apples.id, 380).quantity(1.2))
                .item(NewItem::new(cheese.id, 899 + 50 * (week % 2))),
            &conn,
        )?;

        if week % 2 == 0 {
            create_basket(
                Basket::build(weekly_shop - Duration::days(3))
                    .shop_id(Some(corner_grocer.id))
                    .item(NewItem::new(milk.id, 249))
                    .item(NewItem::new(dish_soap.id, 349)),
                &conn,
            )?;
        }
    }

    println!("Success!");

    Ok(())
}
