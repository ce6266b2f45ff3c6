mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{at, file, paginator, tag};
use medialib_core::adapters::{FILES, TAGS};
use medialib_core::pagination::{ListingParams, MemoryExecutor, Page, Paginator, RequestContext};
use medialib_model::{FileRow, FileSort, SortField, TagRow, TagSort};
use proptest::prelude::*;

async fn walk_forward(
    paginator: &Paginator,
    executor: &MemoryExecutor<TagRow>,
    mut params: ListingParams,
) -> Vec<Page<TagRow>> {
    let ctx = RequestContext::anonymous();
    let mut pages = Vec::new();
    loop {
        let page = paginator
            .list(&TAGS, executor, &ctx, &params)
            .await
            .expect("page fetch");
        let next = page.next_token.clone();
        pages.push(page);
        match next {
            Some(token) => params = params.with_page(token),
            None => break,
        }
    }
    pages
}

async fn walk_backward(
    paginator: &Paginator,
    executor: &MemoryExecutor<TagRow>,
    from: &Page<TagRow>,
    params: &ListingParams,
) -> Vec<TagRow> {
    let ctx = RequestContext::anonymous();
    let mut collected: Vec<TagRow> = from.items.clone();
    let mut prev = from.prev_token.clone();
    while let Some(token) = prev {
        let page = paginator
            .list(&TAGS, executor, &ctx, &params.clone().with_page(token))
            .await
            .expect("page fetch");
        if page.items.is_empty() {
            break;
        }
        let mut items = page.items.clone();
        items.extend(collected);
        collected = items;
        prev = page.prev_token;
    }
    collected
}

fn expected_order(rows: &[TagRow], descending: bool) -> Vec<i32> {
    let mut keyed: Vec<(i32, i32)> = rows.iter().map(|row| (row.file_count, row.id)).collect();
    keyed.sort();
    if descending {
        keyed.reverse();
    }
    keyed.into_iter().map(|(_, id)| id).collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pages_cover_every_row_exactly_once(
        counts in prop::collection::vec(0i32..4, 0..40),
        limit in 1u32..7,
        descending in any::<bool>(),
    ) {
        let rows: Vec<TagRow> = counts
            .iter()
            .enumerate()
            .map(|(index, count)| tag(index as i32 + 1, *count))
            .collect();
        let expected = expected_order(&rows, descending);
        let executor = MemoryExecutor::new(rows);
        let paginator = paginator();
        let params = ListingParams {
            order: Some(TagSort::FileCount.ordinal()),
            order_desc: Some(descending),
            limit: Some(limit),
            page: None,
        };

        let pages = runtime().block_on(walk_forward(&paginator, &executor, params.clone()));
        for page in &pages {
            prop_assert!(page.items.len() <= limit as usize);
        }
        let seen: Vec<i32> = pages.iter().flat_map(|p| p.items.iter().map(|r| r.id)).collect();
        prop_assert_eq!(&seen, &expected);

        let last = pages.iter().rev().find(|page| !page.items.is_empty());
        if let Some(last) = last {
            let back = runtime().block_on(walk_backward(&paginator, &executor, last, &params));
            let back_ids: Vec<i32> = back.iter().map(|r| r.id).collect();
            prop_assert_eq!(back_ids, expected);
        }
    }

    #[test]
    fn prev_token_returns_the_immediately_preceding_page(
        total in 1i32..30,
        limit in 1u32..6,
    ) {
        let rows: Vec<TagRow> = (1..=total).map(|id| tag(id, id % 3)).collect();
        let executor = MemoryExecutor::new(rows);
        let paginator = paginator();
        let params = ListingParams {
            order: Some(TagSort::FileCount.ordinal()),
            limit: Some(limit),
            ..ListingParams::default()
        };

        let pages = runtime().block_on(walk_forward(&paginator, &executor, params.clone()));
        let ctx = RequestContext::anonymous();
        for pair in pages.windows(2) {
            let (before, current) = (&pair[0], &pair[1]);
            if current.items.is_empty() {
                continue;
            }
            let token = current.prev_token.clone().expect("non-empty page has prev token");
            let back = runtime()
                .block_on(paginator.list(&TAGS, &executor, &ctx, &params.clone().with_page(token)))
                .expect("page fetch");
            prop_assert_eq!(&back.items, &before.items);
        }
    }
}

#[tokio::test]
async fn concurrent_writes_neither_repeat_nor_skip_stable_rows() {
    let paginator = paginator();
    let executor = MemoryExecutor::new((1..=30).map(|id| file(id, at(i64::from(id) * 10))).collect());
    let ctx = RequestContext::anonymous();
    let mut params = ListingParams {
        order: Some(FileSort::CreatedAt.ordinal()),
        limit: Some(4),
        ..ListingParams::default()
    };

    let mut seen: Vec<i32> = Vec::new();
    let mut round = 0;
    loop {
        let page = paginator
            .list(&FILES, &executor, &ctx, &params)
            .await
            .expect("page fetch");
        seen.extend(page.items.iter().map(|row: &FileRow| row.id));

        // Between fetches: add rows on both sides of the cursor and drop an
        // unseen original row.
        round += 1;
        executor.insert(file(1_000 + round, at(-round as i64)));
        executor.insert(file(2_000 + round, at(305 + round as i64)));
        let doomed = 30 - round;
        executor.retain(|row| row.id != doomed);

        match page.next_token {
            Some(token) => params = params.with_page(token),
            None => break,
        }
    }

    let unique: HashSet<i32> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len(), "a row was returned twice: {seen:?}");

    // Originals never deleted were present for the whole walk.
    let deleted: HashSet<i32> = (1..=round).map(|r| 30 - r).collect();
    for id in 1..=30 {
        if !deleted.contains(&id) {
            assert!(unique.contains(&id), "stable row {id} was skipped");
        }
    }
    // Rows inserted before the cursor are never returned.
    assert!(seen.iter().all(|id| !(1_000..2_000).contains(id)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn paging_while_another_task_inserts() {
    let paginator = paginator();
    let executor = Arc::new(MemoryExecutor::new(
        (1..=200).map(|id| file(id, at(i64::from(id)))).collect::<Vec<FileRow>>(),
    ));

    let writer = {
        let executor = Arc::clone(&executor);
        tokio::spawn(async move {
            for id in 201..=400 {
                executor.insert(file(id, at(i64::from(id % 250))));
                tokio::task::yield_now().await;
            }
        })
    };

    let ctx = RequestContext::anonymous();
    let mut params = ListingParams {
        order: Some(FileSort::CreatedAt.ordinal()),
        limit: Some(7),
        ..ListingParams::default()
    };
    let mut seen = Vec::new();
    loop {
        let page = paginator
            .list(&FILES, executor.as_ref(), &ctx, &params)
            .await
            .expect("page fetch");
        seen.extend(page.items.iter().map(|row| row.id));
        match page.next_token {
            Some(token) => params = params.with_page(token),
            None => break,
        }
        tokio::task::yield_now().await;
    }
    writer.await.expect("writer task");

    let unique: HashSet<i32> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len());
    for id in 1..=200 {
        assert!(unique.contains(&id), "original row {id} was skipped");
    }
}
