#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for the webmail backend

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use webmail_client::{
    Action, FormKind, Mailbox, Panel, SendOutcome, ViewController, WebmailConfig, render_text,
};

#[derive(Parser)]
#[command(name = "webmail-cli")]
#[command(about = "Terminal client for the webmail backend")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output the rendered page as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List a mailbox
    Mailbox {
        /// Mailbox name (inbox, sent or archive)
        #[arg(default_value = "inbox")]
        name: String,
    },

    /// Show a single email and mark it read
    Show {
        /// Email id
        id: u64,

        /// Mailbox the email is opened from
        #[arg(long, default_value = "inbox")]
        mailbox: String,
    },

    /// Write and send a new email
    Compose {
        /// Comma-separated recipients
        #[arg(long, default_value = "")]
        to: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,
    },

    /// Reply to an email
    Reply {
        /// Id of the email to reply to
        id: u64,

        /// Text written above the quoted original
        #[arg(long)]
        message: Option<String>,
    },

    /// Archive an email, or unarchive it if it is archived
    ToggleArchive {
        /// Email id
        id: u64,
    },

    /// Interactive session reading commands from stdin
    Shell,
}

const SHELL_HELP: &str = "\
commands:
  inbox | sent | archive    list a mailbox
  open N                    open the Nth email of the listing
  reply                     reply to the open email
  toggle                    archive/unarchive the open email
  compose                   write a new email
  to TEXT                   set the recipients of the open form
  subject TEXT              set the subject of the open form
  body TEXT                 write TEXT at the top of the body
  send                      submit the open form
  back | forward            move through history
  help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = WebmailConfig::from_env()?;
    let controller = ViewController::new(&config)?;

    let result = match &args.command {
        Command::Mailbox { name } => cmd_mailbox(&controller, &args, name).await,
        Command::Show { id, mailbox } => cmd_show(&controller, &args, mailbox, *id).await,
        Command::Compose { to, subject, body } => {
            cmd_compose(&controller, &args, to, subject, body).await
        }
        Command::Reply { id, message } => {
            cmd_reply(&controller, &args, *id, message.as_deref()).await
        }
        Command::ToggleArchive { id } => cmd_toggle_archive(&controller, &args, *id).await,
        Command::Shell => cmd_shell(&controller, &args).await,
    };

    controller.settle().await;
    result
}

async fn cmd_mailbox(controller: &ViewController, args: &Args, name: &str) -> anyhow::Result<()> {
    let result = controller.load_mailbox(Mailbox::from(name)).await;
    print_page(controller, args)?;
    Ok(result?)
}

async fn cmd_show(
    controller: &ViewController,
    args: &Args,
    mailbox: &str,
    id: u64,
) -> anyhow::Result<()> {
    let result = controller.view_email(Mailbox::from(mailbox), id).await;
    print_page(controller, args)?;
    Ok(result?)
}

async fn cmd_compose(
    controller: &ViewController,
    args: &Args,
    to: &str,
    subject: &str,
    body: &str,
) -> anyhow::Result<()> {
    controller.compose();
    controller.edit_form(FormKind::Compose, |form| {
        to.clone_into(&mut form.recipients);
        subject.clone_into(&mut form.subject);
        body.clone_into(&mut form.body);
    });
    submit(controller, args, FormKind::Compose).await
}

async fn cmd_reply(
    controller: &ViewController,
    args: &Args,
    id: u64,
    message: Option<&str>,
) -> anyhow::Result<()> {
    if let Err(e) = controller.reply(id).await {
        print_page(controller, args)?;
        return Err(e.into());
    }
    if let Some(message) = message {
        controller.edit_form(FormKind::Reply, |form| write_above(form, message));
    }
    submit(controller, args, FormKind::Reply).await
}

async fn cmd_toggle_archive(controller: &ViewController, args: &Args, id: u64) -> anyhow::Result<()> {
    if let Err(e) = controller.view_email(Mailbox::Inbox, id).await {
        print_page(controller, args)?;
        return Err(e.into());
    }

    let toggle = find_button(controller, |a| matches!(a, Action::ToggleArchive { .. }))
        .context("email has no archive button")?;
    let result = controller.activate(&toggle).await;
    print_page(controller, args)?;
    Ok(result?)
}

async fn cmd_shell(controller: &ViewController, args: &Args) -> anyhow::Result<()> {
    if let Err(e) = controller.start().await {
        eprintln!("error: {e}");
    }
    print_page(controller, args)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{SHELL_HELP}");
                continue;
            }
            _ => {}
        }

        if let Err(e) = shell_command(controller, word, rest.trim()).await {
            eprintln!("error: {e}");
        }
        print_page(controller, args)?;
    }

    Ok(())
}

async fn shell_command(controller: &ViewController, word: &str, rest: &str) -> anyhow::Result<()> {
    match word {
        "inbox" | "sent" | "archive" => controller.load_mailbox(Mailbox::from(word)).await?,
        "open" => {
            let n: usize = rest.parse().context("usage: open N")?;
            let page = controller.page();
            let (_, _, action) = page
                .rows()
                .nth(n.saturating_sub(1))
                .with_context(|| format!("no email number {n}"))?;
            controller.activate(action).await?;
        }
        "reply" => {
            let action = find_button(controller, |a| matches!(a, Action::Reply { .. }))
                .context("the open email cannot be replied to")?;
            controller.activate(&action).await?;
        }
        "toggle" => {
            let action = find_button(controller, |a| matches!(a, Action::ToggleArchive { .. }))
                .context("the open email cannot be archived")?;
            controller.activate(&action).await?;
        }
        "compose" => controller.compose(),
        "to" | "subject" | "body" => {
            let kind = open_form(controller)?;
            controller.edit_form(kind, |form| match word {
                "to" => rest.clone_into(&mut form.recipients),
                "subject" => rest.clone_into(&mut form.subject),
                _ => write_above(form, rest),
            });
        }
        "send" => {
            let kind = open_form(controller)?;
            controller.submit(kind).await?;
        }
        "back" => {
            if !controller.back().await? {
                println!("No earlier page.");
            }
        }
        "forward" => {
            if !controller.forward().await? {
                println!("No later page.");
            }
        }
        other => bail!("unknown command '{other}' (try 'help')"),
    }
    Ok(())
}

async fn submit(controller: &ViewController, args: &Args, kind: FormKind) -> anyhow::Result<()> {
    let outcome = controller.submit(kind).await;
    let alerts = controller.page().alerts().to_vec();
    print_page(controller, args)?;

    match outcome? {
        SendOutcome::Sent(_) => Ok(()),
        SendOutcome::Rejected(_) => bail!("{}", alerts.join("; ")),
    }
}

fn open_form(controller: &ViewController) -> anyhow::Result<FormKind> {
    match controller.page().visible() {
        Panel::Compose => Ok(FormKind::Compose),
        Panel::Reply => Ok(FormKind::Reply),
        Panel::List | Panel::Single => bail!("no form is open"),
    }
}

fn find_button(controller: &ViewController, wanted: impl Fn(&Action) -> bool) -> Option<Action> {
    let page = controller.page();
    if !page.is_visible(Panel::Single) {
        return None;
    }
    page.buttons()
        .map(|(_, action)| action)
        .find(|action| wanted(action))
        .cloned()
}

/// Insert text where the cursor starts: above whatever the body holds.
fn write_above(form: &mut webmail_client::Form, text: &str) {
    form.body = format!("{text}{}", form.body);
}

/// Print the visible page and dismiss its alerts.
fn print_page(controller: &ViewController, args: &Args) -> anyhow::Result<()> {
    let page = controller.page();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render_text(&page));
    }
    controller.take_alerts();
    Ok(())
}
