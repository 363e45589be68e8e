//! Asset resolution
//!
//! Replaces every path-based image source with the bytes behind it, on a
//! copy of the definition. Loads run concurrently; placement follows the
//! document order of the input.

use std::path::PathBuf;

use futures::future::try_join_all;
use jsondocx_model::{DocumentDefinition, Image, ImageSource, Inline, Node};
use tracing::debug;

use crate::error::{DocxError, Result};
use crate::loader::ByteLoader;

/// Produce a copy of `definition` with no `ImageSource::Path` left in it
///
/// The caller's definition is never modified. The first failed load aborts
/// the whole pass.
pub async fn resolve_assets<L>(
    definition: &DocumentDefinition,
    loader: &L,
) -> Result<DocumentDefinition>
where
    L: ByteLoader + ?Sized,
{
    let mut resolved = definition.clone();

    let mut pending = Vec::new();
    collect_nodes(&mut resolved.content, &mut pending);
    if let Some(header) = resolved.header.as_mut() {
        collect_nodes(&mut header.content, &mut pending);
    }
    if let Some(footer) = resolved.footer.as_mut() {
        collect_nodes(&mut footer.content, &mut pending);
    }

    if pending.is_empty() {
        return Ok(resolved);
    }

    let paths: Vec<PathBuf> = pending
        .iter()
        .filter_map(|image| match &image.source {
            ImageSource::Path(path) => Some(path.clone()),
            _ => None,
        })
        .collect();

    let loaded = try_join_all(paths.iter().map(|path| async move {
        let bytes = loader
            .load(path)
            .await
            .map_err(|source| DocxError::AssetResolution {
                path: path.clone(),
                source,
            })?;
        debug!("Resolved image {} ({} bytes)", path.display(), bytes.len());
        Ok::<_, DocxError>(bytes)
    }))
    .await?;

    for (image, bytes) in pending.into_iter().zip(loaded) {
        image.source = ImageSource::Bytes(bytes);
    }

    Ok(resolved)
}

fn collect_nodes<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut Image>) {
    for node in nodes {
        match node {
            Node::Image(image) => collect_image(image, out),
            Node::Paragraph(paragraph) => collect_inlines(&mut paragraph.content, out),
            Node::Table(table) => {
                for row in table.rows.iter_mut() {
                    for cell in row.cells.iter_mut() {
                        collect_inlines(&mut cell.content, out);
                    }
                }
            }
            Node::PlainText(_) | Node::Text(_) | Node::Link(_) => {}
        }
    }
}

fn collect_inlines<'a>(inlines: &'a mut [Inline], out: &mut Vec<&'a mut Image>) {
    for inline in inlines {
        if let Inline::Image(image) = inline {
            collect_image(image, out);
        }
    }
}

fn collect_image<'a>(image: &'a mut Image, out: &mut Vec<&'a mut Image>) {
    if image.is_unresolved() {
        out.push(image);
    }
}
