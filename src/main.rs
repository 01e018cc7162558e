//! Employee Form entry point
//!
//! In the browser this wires the form, both tables and LocalStorage. The
//! native build is a command line front end over a JSON file store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

    use employee_form::{
        App, Field, FormError, Gender, LocalStore, Settings, SystemClock, choice_label,
    };

    type SharedApp = Rc<RefCell<App<LocalStore, SystemClock>>>;

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn current_document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn inputs_matching(document: &Document, selector: &str) -> Vec<HtmlInputElement> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    /// Radio value, falling back to its label text
    fn gender_of(input: &HtmlInputElement) -> Option<Gender> {
        Gender::from_label(&input.value()).or_else(|| {
            input
                .next_element_sibling()
                .and_then(|label| label.text_content())
                .and_then(|text| Gender::from_label(&text))
        })
    }

    /// Checkbox label text (the node after the box), falling back to its value
    fn hobby_of(input: &HtmlInputElement) -> String {
        let text = input.next_sibling().and_then(|node| node.text_content());
        choice_label(text.as_deref(), &input.value())
    }

    fn show_field_state(document: &Document, field: Field, message: Option<String>) {
        if let Some(slot) = document.get_element_by_id(&format!("{}Error", field.id())) {
            slot.set_text_content(Some(message.as_deref().unwrap_or("")));
        }
        if let Some(input) = document.get_element_by_id(field.id()) {
            let classes = input.class_list();
            let _ = if message.is_some() {
                classes.add_1("error-border")
            } else {
                classes.remove_1("error-border")
            };
        }
    }

    fn show_all_field_states(document: &Document, app: &App<LocalStore, SystemClock>) {
        for field in Field::ALL {
            let message = app.form().error(field).map(|e| e.to_string());
            show_field_state(document, field, message);
        }
    }

    fn create(
        document: &Document,
        tag: &str,
        class: Option<&str>,
        text: Option<&str>,
    ) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        if let Some(class) = class {
            el.set_class_name(class);
        }
        if let Some(text) = text {
            el.set_text_content(Some(text));
        }
        Ok(el)
    }

    fn action_buttons(document: &Document, cell: &Element, index: usize) -> Result<(), JsValue> {
        let edit = create(document, "button", Some("editbutton"), Some("Edit"))?;
        edit.set_attribute("data-index", &index.to_string())?;
        let delete = create(document, "button", Some("deletebutton"), Some("Delete"))?;
        delete.set_attribute("data-index", &index.to_string())?;
        cell.append_child(&edit)?;
        cell.append_child(&document.create_text_node(" | "))?;
        cell.append_child(&delete)?;
        Ok(())
    }

    fn display_basic_table(
        document: &Document,
        app: &App<LocalStore, SystemClock>,
    ) -> Result<(), JsValue> {
        let Some(body) = document.query_selector(".basic-table tbody")? else {
            return Ok(());
        };
        body.set_inner_html("");
        for row in app.basic_table().rows {
            let tr = create(document, "tr", None, None)?;
            for cell in &row.cells {
                tr.append_child(&create(document, "td", None, Some(cell.as_str()))?)?;
            }
            let actions = create(document, "td", None, None)?;
            action_buttons(document, &actions, row.index)?;
            tr.append_child(&actions)?;
            body.append_child(&tr)?;
        }
        Ok(())
    }

    fn display_advanced_table(
        document: &Document,
        app: &App<LocalStore, SystemClock>,
    ) -> Result<(), JsValue> {
        let Some(container) = document.query_selector(".advance-table-container")? else {
            return Ok(());
        };
        container.set_inner_html("");

        let table = app.advanced_table();
        if table.is_empty() {
            let placeholder = create(document, "p", None, Some(employee_form::EMPTY_PLACEHOLDER))?;
            container.append_child(&placeholder)?;
            return Ok(());
        }

        let el = create(document, "table", Some("advance-table"), None)?;
        let head = create(document, "thead", None, None)?;
        for row in &table.rows {
            let tr = create(document, "tr", None, None)?;
            tr.append_child(&create(document, "th", None, Some(row.label))?)?;
            for cell in &row.cells {
                tr.append_child(&create(document, "td", None, Some(cell.as_str()))?)?;
            }
            head.append_child(&tr)?;
        }
        let actions = create(document, "tr", None, None)?;
        actions.append_child(&create(document, "th", None, Some("Actions"))?)?;
        for index in &table.columns {
            let td = create(document, "td", None, None)?;
            action_buttons(document, &td, *index)?;
            actions.append_child(&td)?;
        }
        head.append_child(&actions)?;
        el.append_child(&head)?;
        container.append_child(&el)?;
        Ok(())
    }

    fn display_tables(document: &Document, app: &App<LocalStore, SystemClock>) {
        if let Err(e) = display_basic_table(document, app) {
            log::error!("Basic table render failed: {:?}", e);
        }
        if let Err(e) = display_advanced_table(document, app) {
            log::error!("Advanced table render failed: {:?}", e);
        }
    }

    /// Copy the form state into the inputs (after starting an edit)
    fn populate_form(document: &Document, app: &App<LocalStore, SystemClock>) {
        let input = app.form().input();
        for field in Field::ALL {
            if let Some(el) = input_element(document, field.id()) {
                el.set_value(input.raw(field));
            }
        }
        for radio in inputs_matching(document, "input[name=\"gender\"]") {
            radio.set_checked(gender_of(&radio) == input.gender);
        }
        for checkbox in inputs_matching(document, "input[name=\"hobbies\"]") {
            checkbox.set_checked(input.hobbies.contains(&hobby_of(&checkbox)));
        }
        show_all_field_states(document, app);
    }

    fn setup_field_listeners(document: &Document, app: SharedApp) {
        for field in Field::ALL {
            let Some(el) = input_element(document, field.id()) else {
                log::warn!("Missing input #{}", field.id());
                continue;
            };
            let app = app.clone();
            let el_clone = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let result = app.borrow_mut().input(field, el_clone.value());
                if let Ok(document) = current_document() {
                    show_field_state(&document, field, result.err().map(|e| e.to_string()));
                }
            });
            let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_submit(document: &Document, app: SharedApp) -> Result<(), JsValue> {
        let Some(form) = document.query_selector("form")? else {
            return Err(JsValue::from_str("no form"));
        };
        let form: HtmlFormElement = form.dyn_into()?;
        let form_clone = form.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Ok(document) = current_document() else {
                return;
            };

            let result = {
                let mut a = app.borrow_mut();
                for field in Field::ALL {
                    if let Some(el) = input_element(&document, field.id()) {
                        let _ = a.input(field, el.value());
                    }
                }
                let gender = inputs_matching(&document, "input[name=\"gender\"]:checked")
                    .first()
                    .and_then(gender_of);
                a.select_gender(gender);
                a.set_hobbies(
                    inputs_matching(&document, "input[name=\"hobbies\"]:checked")
                        .iter()
                        .map(hobby_of),
                );
                a.submit()
            };

            let a = app.borrow();
            match result {
                Ok(index) => {
                    log::info!("Employee saved at index {}", index);
                    form_clone.reset();
                    display_tables(&document, &a);
                }
                Err(FormError::Invalid(_)) => {}
                Err(FormError::GenderNotSelected) => log::warn!("Submit blocked: no gender selected"),
                Err(e) => log::error!("Submit failed: {}", e),
            }
            show_all_field_states(&document, &a);
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Edit/Delete buttons are rebuilt on every render, so listen once on
    /// the document and dispatch on the clicked button.
    fn setup_table_actions(document: &Document, app: SharedApp) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(button) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button[data-index]").ok().flatten())
            else {
                return;
            };
            let Some(index) = button
                .get_attribute("data-index")
                .and_then(|i| i.parse::<usize>().ok())
            else {
                return;
            };
            let Ok(document) = current_document() else {
                return;
            };

            let classes = button.class_list();
            if classes.contains("editbutton") {
                let result = app.borrow_mut().edit(index);
                match result {
                    Ok(()) => populate_form(&document, &app.borrow()),
                    Err(e) => log::error!("Edit failed: {}", e),
                }
            } else if classes.contains("deletebutton") {
                let result = app.borrow_mut().delete(index);
                match result {
                    Ok(removed) => log::info!("Deleted {}", removed.name),
                    Err(e) => log::error!("Delete failed: {}", e),
                }
                display_tables(&document, &app.borrow());
            }
        });
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(to_js)?;

        log::info!("Employee form starting...");

        let settings = Settings::default();
        let storage = LocalStore::open().map_err(to_js)?;
        let app = App::open(storage, &settings.storage_key, SystemClock).map_err(to_js)?;
        let app: SharedApp = Rc::new(RefCell::new(app));

        let document = current_document()?;
        setup_field_listeners(&document, app.clone());
        setup_submit(&document, app.clone())?;
        setup_table_actions(&document, app.clone())?;
        display_tables(&document, &app.borrow());

        log::info!("Employee form ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow, bail};
    use clap::{Args, Parser, Subcommand, ValueEnum};

    use employee_form::{App, Field, FileStore, FormError, Gender, Settings, SystemClock};

    #[derive(Parser, Debug)]
    #[command(name = "employee-form", about = "Manage locally stored employee records")]
    struct Cli {
        /// Directory holding the JSON store
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        /// Storage key the list is kept under
        #[arg(long, global = true)]
        key: Option<String>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Print the stored employees
        List {
            #[arg(long, value_enum, default_value_t = Layout::Basic)]
            layout: Layout,
        },
        /// Validate and append a new employee
        Add(EmployeeArgs),
        /// Validate and overwrite the employee at INDEX
        Edit {
            index: usize,
            #[command(flatten)]
            fields: EmployeeArgs,
        },
        /// Remove the employee at INDEX
        Delete { index: usize },
        /// Run one field check (name, dob, email, phone)
        Check { field: String, value: String },
    }

    #[derive(ValueEnum, Clone, Copy, Debug)]
    enum Layout {
        /// One row per employee
        Basic,
        /// One row per field
        Advanced,
    }

    /// Unset fields keep the form's current value (empty for `add`)
    #[derive(Args, Debug)]
    struct EmployeeArgs {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Repeat for several; replaces the current set when given
        #[arg(long = "hobby")]
        hobbies: Vec<String>,
    }

    type CliApp = App<FileStore, SystemClock>;

    fn apply(app: &mut CliApp, args: EmployeeArgs) -> Result<()> {
        let fields = [
            (Field::Name, args.name),
            (Field::Dob, args.dob),
            (Field::Email, args.email),
            (Field::Phone, args.phone),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                // failures are reported together on submit
                let _ = app.input(field, value);
            }
        }
        if let Some(label) = args.gender {
            let gender = Gender::from_label(&label)
                .ok_or_else(|| anyhow!("unknown gender {:?} (expected Male or Female)", label))?;
            app.select_gender(Some(gender));
        }
        if !args.hobbies.is_empty() {
            app.set_hobbies(args.hobbies);
        }
        Ok(())
    }

    fn submit(app: &mut CliApp) -> Result<usize> {
        match app.submit() {
            Ok(index) => Ok(index),
            Err(FormError::Invalid(errors)) => {
                for (field, error) in &errors {
                    eprintln!("{}: {}", field, error);
                }
                bail!("employee not saved")
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let settings = Settings::from_env().with_overrides(cli.key, cli.data_dir);
        log::debug!("Using {:?}", settings);

        let storage = FileStore::new(settings.data_dir.clone());
        let mut app = App::open(storage, &settings.storage_key, SystemClock)
            .with_context(|| format!("opening store in {}", settings.data_dir.display()))?;

        match cli.command {
            Command::List { layout } => match layout {
                Layout::Basic => print!("{}", app.basic_table()),
                Layout::Advanced => print!("{}", app.advanced_table()),
            },
            Command::Add(fields) => {
                apply(&mut app, fields)?;
                let index = submit(&mut app)?;
                println!("Added employee at index {}", index);
            }
            Command::Edit { index, fields } => {
                app.edit(index)?;
                apply(&mut app, fields)?;
                submit(&mut app)?;
                println!("Updated employee at index {}", index);
            }
            Command::Delete { index } => {
                let removed = app.delete(index)?;
                println!("Deleted {} (was index {})", removed.name, index);
            }
            Command::Check { field, value } => {
                let field =
                    Field::from_id(&field).ok_or_else(|| anyhow!("unknown field {:?}", field))?;
                match app.input(field, value) {
                    Ok(()) => println!("{}: ok", field),
                    Err(e) => bail!("{}: {}", field, e),
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
