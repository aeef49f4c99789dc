//! Sample catalog used to populate an empty store

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{error::AppResult, models::book::NewBook, services::catalog::CatalogService};

fn sample(name: &str, author: &str, isbn: &str, date: (i32, u32, u32), cents: i64, stock: i32) -> NewBook {
    NewBook {
        name: name.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        published_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        price: Some(Decimal::new(cents, 2)),
        stock,
    }
}

/// The fifteen books shipped with a fresh installation
pub fn sample_books() -> Vec<NewBook> {
    vec![
        sample("Cien años de soledad", "Gabriel García Márquez", "9780307474728", (1967, 6, 5), 1999, 15),
        sample("Don Quijote de la Mancha", "Miguel de Cervantes", "9788420412146", (1605, 1, 16), 2450, 10),
        sample("1984", "George Orwell", "9780451524935", (1949, 6, 8), 1599, 20),
        sample("El principito", "Antoine de Saint-Exupéry", "9780156012195", (1943, 4, 6), 1299, 25),
        sample("Crónica de una muerte anunciada", "Gabriel García Márquez", "9780307387387", (1981, 1, 1), 1699, 8),
        sample("La sombra del viento", "Carlos Ruiz Zafón", "9788408163251", (2001, 4, 17), 2199, 12),
        sample("El amor en los tiempos del cólera", "Gabriel García Márquez", "9780307389732", (1985, 1, 1), 1899, 7),
        sample("Rayuela", "Julio Cortázar", "9788420471570", (1963, 6, 28), 2250, 5),
        sample("La casa de los espíritus", "Isabel Allende", "9780525433446", (1982, 1, 1), 1799, 9),
        sample("El túnel", "Ernesto Sabato", "9788432217197", (1948, 1, 1), 1399, 6),
        sample("Ficciones", "Jorge Luis Borges", "9780802130303", (1944, 1, 1), 1499, 11),
        sample("Pedro Páramo", "Juan Rulfo", "9780802133908", (1955, 3, 19), 1350, 8),
        sample("Los detectives salvajes", "Roberto Bolaño", "9780374191481", (1998, 1, 1), 1999, 4),
        sample("El Aleph", "Jorge Luis Borges", "9780142437889", (1949, 1, 1), 1450, 10),
        sample("Como agua para chocolate", "Laura Esquivel", "9780385721233", (1989, 1, 1), 1650, 13),
    ]
}

/// Import the sample books unless the catalog already holds some.
/// Returns the number of books created.
pub async fn seed_catalog(catalog: &CatalogService) -> AppResult<usize> {
    let existing = catalog.count_books().await?;
    if existing > 0 {
        tracing::info!("Catalog already contains {} books, skipping seed", existing);
        return Ok(0);
    }

    let created = catalog.import_books(sample_books()).await?;
    tracing::info!("Seeded catalog with {} books", created.len());
    for book in &created {
        tracing::debug!("  - {} by {} (stock: {})", book.name, book.author, book.stock);
    }
    Ok(created.len())
}
