//! Shell command handlers.

use uuid::Uuid;

use crate::cli::context::{CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::core::services::draft_service::{parse_flag, DraftUpdate, DRAFT_FIELDS};
use crate::core::services::PricingService;
use crate::core::{BookingWizard, Transition, WizardStep};
use crate::domain::{Displayable, FabricChoice, MeasurementCategory, Order, OrderStatus};
use crate::utils::build_info;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "start", usage: "start <service> <tailor>", description: "Begin a new booking" },
    CommandSpec { name: "set", usage: "set <field> <value>", description: "Replace one draft field" },
    CommandSpec { name: "fabrics", usage: "fabrics", description: "List the fabric catalog" },
    CommandSpec { name: "fabric", usage: "fabric <id>", description: "Choose a catalog fabric" },
    CommandSpec { name: "own-fabric", usage: "own-fabric <on|off>", description: "Bring your own fabric" },
    CommandSpec { name: "image", usage: "image <uri>", description: "Attach a reference image" },
    CommandSpec { name: "tab", usage: "tab <top|bottom|full>", description: "Switch measurement category" },
    CommandSpec { name: "measure", usage: "measure <field> <value>", description: "Record one measurement" },
    CommandSpec { name: "done-measurements", usage: "done-measurements", description: "Finish measurements" },
    CommandSpec { name: "next", usage: "next", description: "Go to the next step (submits on review)" },
    CommandSpec { name: "back", usage: "back", description: "Go to the previous step" },
    CommandSpec { name: "review", usage: "review", description: "Show the booking summary" },
    CommandSpec { name: "status", usage: "status", description: "Show wizard position" },
    CommandSpec { name: "orders", usage: "orders [tailor]", description: "List stored orders" },
    CommandSpec { name: "order", usage: "order <id>", description: "Show an order and its timeline" },
    CommandSpec { name: "advance", usage: "advance <id> <status>", description: "Move an order forward" },
    CommandSpec { name: "cancel", usage: "cancel <id>", description: "Cancel an order" },
    CommandSpec { name: "version", usage: "version", description: "Show build information" },
    CommandSpec { name: "help", usage: "help", description: "List commands" },
    CommandSpec { name: "exit", usage: "exit", description: "Leave the shell" },
];

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|spec| spec.name).collect()
}

pub fn dispatch(
    context: &mut ShellContext,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match command {
        "start" => start(context, args)?,
        "set" => set_field(context, args)?,
        "fabrics" => list_fabrics(context),
        "fabric" => {
            let id = single_arg(args, "fabric <id>")?;
            context
                .wizard_mut()?
                .update(DraftUpdate::SelectFabric(id.to_string()))?;
            show_total(context)?;
        }
        "own-fabric" => {
            let flag = parse_flag("own-fabric", single_arg(args, "own-fabric <on|off>")?)?;
            context
                .wizard_mut()?
                .update(DraftUpdate::BringOwnFabric(flag))?;
            show_total(context)?;
        }
        "image" => {
            let uri = single_arg(args, "image <uri>")?;
            context
                .wizard_mut()?
                .update(DraftUpdate::AddReferenceImage(uri.to_string()))?;
            output::success("Reference image attached.");
        }
        "tab" => {
            let raw = single_arg(args, "tab <top|bottom|full>")?;
            let category: MeasurementCategory =
                raw.parse().map_err(CommandError::InvalidArguments)?;
            context.wizard_mut()?.switch_measurement_category(category)?;
            print_measurement_form(context.wizard_ref()?);
        }
        "measure" => {
            if args.len() < 2 {
                return Err(usage("measure <field> <value>"));
            }
            let value = args[1..].join(" ");
            context.wizard_mut()?.set_measurement(args[0], &value)?;
        }
        "done-measurements" => {
            let transition = context.wizard_mut()?.complete_measurements()?;
            report_transition(context, transition);
        }
        "next" => {
            let wizard = context.wizard.as_mut().ok_or(CommandError::NoActiveBooking)?;
            let transition = wizard.next(&context.orders)?;
            report_transition(context, transition);
        }
        "back" => {
            let transition = context.wizard_mut()?.back()?;
            report_transition(context, transition);
        }
        "review" => print_review(context)?,
        "status" => print_status(context)?,
        "orders" => list_orders(context, args.first().copied())?,
        "order" => {
            let id = parse_order_id(single_arg(args, "order <id>")?)?;
            let order = context.orders.get(id)?;
            print_order(context, &order);
        }
        "advance" => {
            if args.len() < 2 {
                return Err(usage("advance <id> <status>"));
            }
            let id = parse_order_id(args[0])?;
            let status: OrderStatus = args[1..].join(" ").parse()?;
            let order = context.orders.advance(id, status)?;
            output::success(format!("Order {} is now {}.", order.id, order.status));
        }
        "cancel" => {
            let id = parse_order_id(single_arg(args, "cancel <id>")?)?;
            context.orders.cancel(id)?;
            output::success(format!("Order {id} cancelled."));
        }
        "version" => output::info(build_info::current().summary()),
        "help" => print_help(),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => {
            output::warning(format!(
                "Unknown command `{other}`. Type `help` to see available commands."
            ));
            context.suggest(other, &command_names());
        }
    }
    Ok(LoopControl::Continue)
}

fn start(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let [service_id, tailor_id] = args else {
        return Err(usage("start <service> <tailor>"));
    };
    if context.wizard.as_ref().is_some_and(|w| !w.is_finished()) {
        output::warning("Discarding the booking in progress.");
    }
    let wizard = BookingWizard::new(*service_id, *tailor_id, &context.config);
    output::success(format!(
        "Booking {service_id} with {tailor_id}. Step 1/{}: {}",
        WizardStep::ALL.len(),
        WizardStep::Details
    ));
    context.wizard = Some(wizard);
    Ok(())
}

fn set_field(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(usage("set <field> <value>"));
    }
    let key = args[0];
    let value = args[1..].join(" ");
    let result = context.wizard_mut()?.update_field(key, &value);
    if result.is_err() && !DRAFT_FIELDS.contains(&key) {
        context.suggest(key, &DRAFT_FIELDS);
    }
    result?;
    show_total(context)
}

fn list_fabrics(context: &ShellContext) {
    output::section("Fabrics");
    let currency = &context.config.currency;
    let rows: Vec<(String, String)> = context
        .config
        .fabrics
        .iter()
        .map(|fabric| {
            (
                fabric.id.clone(),
                format!(
                    "{}  +{}",
                    fabric.name,
                    PricingService::format_amount(fabric.price, currency)
                ),
            )
        })
        .collect();
    output::key_values(&rows);
}

fn show_total(context: &ShellContext) -> Result<(), CommandError> {
    let total = context.wizard_ref()?.draft().total_price();
    output::info(format!(
        "Total: {}",
        PricingService::format_amount(total, &context.config.currency)
    ));
    Ok(())
}

fn report_transition(context: &ShellContext, transition: Transition) {
    match transition {
        Transition::Advanced(step) | Transition::Retreated(step) => output::info(format!(
            "Step {}/{}: {}",
            step.index() + 1,
            WizardStep::ALL.len(),
            step
        )),
        Transition::OpenMeasurements(route) => {
            output::info(format!("Opened {route}"));
            if let Some(wizard) = &context.wizard {
                print_measurement_form(wizard);
            }
        }
        Transition::Submitted(route) => output::success(format!("Booking submitted -> {route}")),
        Transition::Exit => output::info("Left the booking wizard."),
    }
}

fn print_measurement_form(wizard: &BookingWizard) {
    let Some(form) = wizard.measurement_form() else {
        return;
    };
    output::section(format!("Measurements: {}", form.category));
    let rows: Vec<(String, String)> = form
        .category
        .fields()
        .iter()
        .map(|key| (key.to_string(), form.get(key).unwrap_or("-").to_string()))
        .collect();
    output::key_values(&rows);
}

fn print_review(context: &ShellContext) -> Result<(), CommandError> {
    let summary = context.wizard_ref()?.review();
    let currency = &context.config.currency;
    output::section("Review");

    let fabric = match &summary.fabric {
        FabricChoice::Undecided => "not chosen".to_string(),
        FabricChoice::Catalog { fabric_id, .. } => fabric_id.clone(),
        FabricChoice::BringOwn => "bringing own fabric".to_string(),
    };
    let mut rows = vec![
        ("Service".to_string(), summary.service_id.clone()),
        ("Tailor".to_string(), summary.tailor_id.clone()),
        ("Color".to_string(), or_dash(&summary.color_preference)),
        ("Notes".to_string(), or_dash(&summary.design_notes)),
        ("Images".to_string(), summary.reference_images.len().to_string()),
        ("Fabric".to_string(), fabric),
        (
            "Appointment".to_string(),
            format!(
                "{} {}",
                or_dash(&summary.appointment_date),
                summary.appointment_time
            )
            .trim()
            .to_string(),
        ),
        ("Measurements".to_string(), summary.measurements.len().to_string()),
    ];
    rows.extend(PricingService::lines(&summary.prices, currency));
    output::key_values(&rows);
    Ok(())
}

fn print_status(context: &ShellContext) -> Result<(), CommandError> {
    let wizard = context.wizard_ref()?;
    let position = match (wizard.current_step(), wizard.measurement_form()) {
        (Some(step), _) => format!("Step {}/{}: {}", step.index() + 1, WizardStep::ALL.len(), step),
        (None, Some(form)) => format!("Capturing measurements ({})", form.category),
        (None, None) if wizard.is_finished() => "Finished".to_string(),
        (None, None) => "Unknown".to_string(),
    };
    output::info(position);
    Ok(())
}

fn list_orders(context: &ShellContext, tailor: Option<&str>) -> Result<(), CommandError> {
    let orders = match tailor {
        Some(tailor) => context.orders.list_for_tailor(tailor)?,
        None => context.orders.list()?,
    };
    if orders.is_empty() {
        output::info("No orders yet.");
        return Ok(());
    }
    output::section("Orders");
    for order in &orders {
        println!("  {}", order.display_label());
    }
    Ok(())
}

fn print_order(context: &ShellContext, order: &Order) {
    output::section(format!("Order {}", order.id));
    output::key_values(&[
        ("Tailor".to_string(), order.tailor_id.clone()),
        ("Service".to_string(), order.service_id.clone()),
        (
            "Total".to_string(),
            PricingService::format_amount(order.total_price, &context.config.currency),
        ),
        ("Status".to_string(), order.status.to_string()),
    ]);
    for entry in order.timeline().entries {
        let marker = if entry.current {
            "●"
        } else if entry.reached {
            "✓"
        } else {
            "○"
        };
        let when = entry
            .at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {marker} {:<18} {when}", entry.status.label());
    }
}

fn print_help() {
    output::section("Commands");
    let rows: Vec<(String, String)> = COMMANDS
        .iter()
        .map(|spec| (spec.usage.to_string(), spec.description.to_string()))
        .collect();
    output::key_values(&rows);
}

fn single_arg<'a>(args: &[&'a str], usage_text: &str) -> Result<&'a str, CommandError> {
    match args {
        [value] => Ok(*value),
        _ => Err(usage(usage_text)),
    }
}

fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {text}"))
}

fn parse_order_id(raw: &str) -> Result<Uuid, CommandError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not an order id")))
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
