// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merge service — concatenate uploaded PDFs into one document, preserving
// upload order.

use lopdf::{Document, Object, ObjectId};
use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::UploadedFile;
use tracing::{info, instrument};

use crate::pdf::PdfReader;

/// Merge the uploaded PDFs into a single document, in the order given.
///
/// Objects from each source are imported into the first document with
/// their IDs offset past the destination's current maximum, so references
/// never collide. The destination page tree is then rebuilt to list every
/// page in upload order.
#[instrument(skip_all, fields(files = inputs.len()))]
pub fn merge(inputs: &[UploadedFile]) -> Result<Vec<u8>> {
    if inputs.is_empty() {
        return Err(PdfHubError::Validation(
            "no files were provided to merge".to_string(),
        ));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for input in inputs {
        documents.push(PdfReader::from_bytes(&input.bytes)?.into_document());
    }

    // A single valid PDF merges to itself.
    if documents.len() == 1 {
        return Ok(inputs[0].bytes.clone());
    }

    let mut sources = documents;
    let mut dest = sources.remove(0);
    let mut dest_max_id = dest.max_id;
    let mut page_refs = ordered_page_refs(&dest);

    for source in sources {
        let source_pages = ordered_page_refs(&source);
        let id_offset = dest_max_id;

        for (old_id, object) in source.objects.into_iter() {
            let new_id = (old_id.0 + id_offset, old_id.1);
            dest.objects.insert(new_id, remap_refs(object, id_offset));
        }

        for old_ref in source_pages {
            page_refs.push((old_ref.0 + id_offset, old_ref.1));
        }

        dest_max_id = (source.max_id + id_offset).max(dest_max_id);
    }

    dest.max_id = dest_max_id;
    rebuild_page_tree(&mut dest, page_refs)?;
    // The source catalogs and page-tree roots are orphans after the
    // rebuild; drop them rather than shipping them in the output.
    dest.prune_objects();
    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer)
        .map_err(|err| PdfHubError::Merge(format!("could not write result: {err}")))?;

    info!(
        files = inputs.len(),
        bytes = buffer.len(),
        "PDFs merged"
    );
    Ok(buffer)
}

/// Page object references in document page order.
fn ordered_page_refs(document: &Document) -> Vec<ObjectId> {
    document.get_pages().values().copied().collect()
}

/// Recursively shift every object reference by `offset`.
fn remap_refs(object: Object, offset: u32) -> Object {
    match object {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|item| remap_refs(item, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's Pages node at the merged page list and reparent
/// every page under it.
fn rebuild_page_tree(document: &mut Document, page_refs: Vec<ObjectId>) -> Result<()> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| PdfHubError::Merge("document has no catalog".to_string()))?;

    let pages_id = document
        .objects
        .get(&catalog_id)
        .ok_or_else(|| PdfHubError::Merge("catalog object is missing".to_string()))?
        .as_dict()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| PdfHubError::Merge("catalog has no page tree".to_string()))?;

    let Some(Object::Dictionary(pages_dict)) = document.objects.get_mut(&pages_id) else {
        return Err(PdfHubError::Merge("page tree root is not a dictionary".to_string()));
    };
    let kids: Vec<Object> = page_refs.iter().map(|id| Object::Reference(*id)).collect();
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", Object::Integer(page_refs.len() as i64));

    for page_id in page_refs {
        if let Some(Object::Dictionary(page_dict)) = document.objects.get_mut(&page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}
