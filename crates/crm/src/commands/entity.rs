//! `crm <tasks|leads|projects|contacts> ...` -- one entity page per call.
//!
//! Every subcommand drives the same [`EntityPage`] and [`RecordTable`] a
//! long-running front-end would: `list` mounts the page and renders the
//! table, `show` fetches one record and clicks its row, `create`/`update`
//! submit a panel, and `delete` goes through the table's delete handler.

use anyhow::{Context, Result, bail};
use crm_client::{ApiClient, ClientError, RecordApi};
use crm_core::Message;
use crm_ui::{EntityPage, EntityView, FormSpec, RecordTable, record_table};
use tracing::debug;

use crate::cli::{EntityArgs, EntityCommands};
use crate::commands::CliNotifier;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_panel, output_table, records_json};

type Page<R> = EntityPage<R, ApiClient, CliNotifier>;

/// Execute an entity subcommand for records of type `R`.
pub fn run<R: EntityView>(ctx: &RuntimeContext, args: &EntityArgs) -> Result<()> {
    let notifier = CliNotifier::new(ctx.json, ctx.quiet);
    let mut table = record_table::<R>();
    debug!(kind = %R::KIND, api = %ctx.api_url, "entity command");

    match &args.command {
        EntityCommands::List(list) => {
            let page = mounted::<R>(ctx, notifier)?;
            if let Some(query) = &list.search {
                table.set_query(query.as_str());
            }
            if ctx.json {
                output_json(&records_json(table.filter(page.records())));
            } else {
                output_table(&table.view(page.records()), R::KIND.collection(), ctx.quiet)?;
            }
            Ok(())
        }

        EntityCommands::Show(show) => {
            let mut page: Page<R> = EntityPage::new(ctx.client(), notifier);
            let record = fetch(&page, &show.id)?;
            table.click_row(&record, &mut page);
            print_record(ctx, &table, &record);
            Ok(())
        }

        EntityCommands::Create(create) => {
            let fields = FormSpec::for_kind(R::KIND).parse_assignments(&create.fields)?;
            let mut page: Page<R> = EntityPage::new(ctx.client(), notifier);
            table.open_create();
            let created = page.submit(table.panel_mut(), &fields)?;
            page.notifier_mut().check()?;
            let record = created.context("the API returned no record")?;
            table.click_row(&record, &mut page);
            print_record(ctx, &table, &record);
            Ok(())
        }

        EntityCommands::Update(update) => {
            let fields = FormSpec::for_kind(R::KIND).parse_assignments(&update.fields)?;
            let mut page: Page<R> = EntityPage::new(ctx.client(), notifier);
            let record = fetch(&page, &update.id)?;
            table.open_edit(&record);
            let updated = page.submit(table.panel_mut(), &fields)?;
            page.notifier_mut().check()?;
            let record = updated.context("the API returned no record")?;
            table.click_row(&record, &mut page);
            print_record(ctx, &table, &record);
            Ok(())
        }

        EntityCommands::Delete(delete) => {
            let mut page: Page<R> = EntityPage::new(ctx.client(), notifier);
            let record = fetch(&page, &delete.id)?;
            table.delete(&record, &mut page);
            page.notifier_mut().check()?;
            if ctx.json {
                output_json(&Message::new(format!("{} deleted", R::KIND.label())));
            }
            Ok(())
        }
    }
}

/// Mounts the page, failing if the list could not be fetched.
fn mounted<R: EntityView>(ctx: &RuntimeContext, notifier: CliNotifier) -> Result<Page<R>> {
    let mut page = EntityPage::mount(ctx.client(), notifier);
    page.notifier_mut().check()?;
    Ok(page)
}

/// `GET /:id` through the page's API. A 404 names the missing record.
fn fetch<R: EntityView>(page: &Page<R>, id: &str) -> Result<R> {
    match RecordApi::<R>::get_record(page.api(), id) {
        Ok(record) => Ok(record),
        Err(ClientError::Status { status: 404, .. }) => {
            bail!("{} not found: {}", R::KIND.label(), id)
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to load {} {}", R::KIND.label().to_lowercase(), id)
        }),
    }
}

fn print_record<R: EntityView>(ctx: &RuntimeContext, table: &RecordTable<R>, record: &R) {
    if ctx.json {
        output_json(&record.to_value());
    } else if let Some(panel) = table.render_panel() {
        output_panel(&panel);
    }
}
