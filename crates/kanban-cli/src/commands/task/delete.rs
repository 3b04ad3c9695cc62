use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Tabular, output};

#[derive(Debug, Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

impl Tabular for Deleted<'_> {
    fn headers(&self) -> Vec<&'static str> {
        vec!["id", "deleted"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![self.id.to_string(), self.deleted.to_string()]]
    }
}

pub async fn run(id: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.board.load_all().await?;
    ctx.board.delete_task(id).await?;
    output(&Deleted { id, deleted: true }, flags.format)
}
