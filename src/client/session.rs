use super::{ItemsClient, LOAD_FAILED_BANNER};
use itembox_schema::{Item, ItemPayload};
use std::io::{self, Write};
use tracing::error;

/// One user action against the items API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Create(ItemPayload),
    Update(i64, ItemPayload),
    Delete(i64),
}

/// Whether the list shown after an action could be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Loaded(usize),
    Failed,
}

/// Perform `action`, then refetch and print the full list.
///
/// A failed mutation is only logged. A failed list load prints
/// [`LOAD_FAILED_BANNER`] in place of the items.
pub async fn run<W: Write>(client: &ItemsClient, action: Action, out: &mut W) -> io::Result<Refresh> {
    let mutation = match action {
        Action::List => Ok(()),
        Action::Create(payload) => client.create(&payload).await.map(|_| ()),
        Action::Update(id, payload) => client.update(id, &payload).await.map(|_| ()),
        Action::Delete(id) => client.delete(id).await.map(|_| ()),
    };
    if let Err(e) = mutation {
        error!(error = %e, "item mutation failed");
    }

    match client.list().await {
        Ok(items) => {
            write_items(&items, out)?;
            Ok(Refresh::Loaded(items.len()))
        }
        Err(e) => {
            error!(error = %e, "Error fetching data");
            writeln!(out, "{LOAD_FAILED_BANNER}")?;
            Ok(Refresh::Failed)
        }
    }
}

pub fn write_items<W: Write>(items: &[Item], out: &mut W) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "(no items)");
    }
    for item in items {
        writeln!(
            out,
            "{:>4}  {}: {}",
            item.id,
            item.name,
            item.description.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}
