mod actions;
mod boot;
mod folders;

use std::sync::Arc;

use cosmic::app::{Core, Task};
use cosmic::iced::keyboard;
use cosmic::iced::{window, Event, Length, Subscription};
use cosmic::widget;
use cosmic::Element;

use indexmap::IndexMap;

use crate::config::AppConfig;
use crate::core::breakpoint::BreakpointManager;
use crate::core::drop::MoveCoordinator;
use crate::core::folder_list::{FolderKey, FolderListState};
use crate::core::models::MessageRow;
use crate::core::panel::PanelVisibility;
use crate::core::remote::MailCommandLog;
use crate::core::scroll::ScrollRegion;
use crate::core::store::{self, CrashLog, ExpandStore};
use crate::dnd_models::DraggedMessages;

use boot::UiProbe;

const APP_ID: &str = "com.driftmail.shell";

/// Modal popups reachable from the folder sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Compose,
    CreateFolder,
    Contacts,
}

pub struct AppModel {
    core: Core,
    pub(super) config: AppConfig,

    // Interaction core
    pub(super) folder_list: FolderListState,
    pub(super) coordinator: MoveCoordinator,
    pub(super) breakpoints: BreakpointManager,
    pub(super) panel: PanelVisibility,
    pub(super) probe: Arc<UiProbe>,

    // Collaborators
    pub(super) expand_store: ExpandStore,
    pub(super) mail: MailCommandLog,

    // Shared input context, read at the moment of use
    pub(super) ctrl_held: bool,

    // Mailbox content (fixtures until a backend is wired in)
    pub(super) mailboxes: IndexMap<String, Vec<MessageRow>>,
    pub(super) messages: Vec<MessageRow>,
    pub(super) open_message: Option<usize>,
    /// Cached per-folder content hashes; a cleared entry forces a refetch.
    pub(super) content_hashes: IndexMap<String, String>,

    // View state
    pub(super) scroll_region: Option<ScrollRegion>,
    pub(super) drag_target: Option<String>,
    pub(super) open_popup: Option<Popup>,
    pub(super) status_message: String,

    // Deferred-action bookkeeping
    pub(super) window_width: u32,
    pub(super) settle_generation: u64,
    pub(super) logout_generation: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Folder list input
    FolderKey(FolderKey),
    FolderListFocus(bool),
    ToggleCollapse(String),
    SelectFolder(String),
    FolderListScrolled { viewport_height: f32, offset: f32 },

    // Drag and drop
    FolderDragEnter(String),
    FolderDragLeave,
    HoverElapsed(u64),
    DropMessages {
        target: String,
        data: DraggedMessages,
    },

    // Message panes
    OpenMessage(usize),

    // Breakpoints / shared input context
    ViewportResized { width: u32, height: f32 },
    ResizeSettled(u64),
    ModifiersChanged(bool),

    // Popups and session
    OpenPopup(Popup),
    ClosePopup,
    Logout,
    LogoutRedirect(u64),

    Noop,
}

impl cosmic::Application for AppModel {
    type Executor = cosmic::executor::Default;
    type Flags = ();
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, _flags: Self::Flags) -> (Self, Task<Self::Message>) {
        let config = AppConfig::load();

        let expand_store = ExpandStore::open(ExpandStore::default_path());
        let mut tree = match store::load_folder_seed(&store::folder_seed_path()) {
            Ok(Some(tree)) => {
                log::info!("Folder tree loaded from seed file");
                tree
            }
            Ok(None) => store::builtin_tree(),
            Err(e) => {
                log::warn!("Folder seed error, using built-in tree: {}", e);
                store::builtin_tree()
            }
        };
        expand_store.apply(&mut tree);

        let panel = PanelVisibility::new();
        let probe = Arc::new(UiProbe::new(panel.clone()));

        let mut breakpoints = BreakpointManager::new();
        if let Err(e) = boot::register_breakpoints(&mut breakpoints, &panel, &probe) {
            log::error!("Screen state registration failed: {}", e);
        }

        boot::install_panic_hook(
            probe.clone(),
            Arc::new(CrashLog::open(CrashLog::default_path())),
        );

        let mut app = AppModel {
            core,
            config,
            folder_list: FolderListState::new(tree),
            coordinator: MoveCoordinator::new(),
            breakpoints,
            panel,
            probe,
            expand_store,
            mail: MailCommandLog::default(),
            ctrl_held: false,
            mailboxes: store::builtin_mailboxes(),
            messages: Vec::new(),
            open_message: None,
            content_hashes: IndexMap::new(),
            scroll_region: None,
            drag_target: None,
            open_popup: None,
            status_message: "Ready".into(),
            window_width: 0,
            settle_generation: 0,
            logout_generation: 0,
        };

        let title_task = app.set_window_title("Driftmail".into());
        let settle_task = app.arm_resize_settle();

        (app, cosmic::task::batch(vec![title_task, settle_task]))
    }

    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.open_popup.map(crate::ui::popup::view)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subs = Vec::new();

        if self.folder_list.is_focused() {
            // Folder-list keyboard scope is active.
            subs.push(cosmic::iced_futures::event::listen_raw(|event, status, _| {
                if cosmic::iced_core::event::Status::Ignored != status {
                    return None;
                }
                match event {
                    Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                        Some(Message::ModifiersChanged(modifiers.control()))
                    }
                    Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                        let key = match key {
                            keyboard::Key::Named(keyboard::key::Named::ArrowUp) => FolderKey::Up,
                            keyboard::Key::Named(keyboard::key::Named::ArrowDown) => {
                                FolderKey::Down
                            }
                            keyboard::Key::Named(keyboard::key::Named::Enter) => FolderKey::Enter,
                            keyboard::Key::Named(keyboard::key::Named::Space) => FolderKey::Space,
                            keyboard::Key::Named(keyboard::key::Named::Escape) => {
                                FolderKey::Escape
                            }
                            keyboard::Key::Named(keyboard::key::Named::Tab) => {
                                if modifiers.shift() {
                                    FolderKey::ShiftTab
                                } else {
                                    FolderKey::Tab
                                }
                            }
                            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                                FolderKey::Right
                            }
                            _ => return None,
                        };
                        Some(Message::FolderKey(key))
                    }
                    Event::Window(window::Event::Resized(size)) => {
                        Some(Message::ViewportResized {
                            width: size.width as u32,
                            height: size.height,
                        })
                    }
                    _ => None,
                }
            }));
        } else {
            subs.push(cosmic::iced_futures::event::listen_raw(|event, status, _| {
                if cosmic::iced_core::event::Status::Ignored != status {
                    return None;
                }
                match event {
                    Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                        Some(Message::ModifiersChanged(modifiers.control()))
                    }
                    Event::Window(window::Event::Resized(size)) => {
                        Some(Message::ViewportResized {
                            width: size.width as u32,
                            height: size.height,
                        })
                    }
                    _ => None,
                }
            }));
        }

        Subscription::batch(subs)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let mut panes = widget::row().spacing(1);

        // The left panel obeys the shared visibility flag owned by the
        // breakpoint subsystem.
        if !self.panel.is_disabled() {
            panes = panes.push(
                widget::container(crate::ui::folder_list::view(
                    &self.folder_list,
                    self.drag_target.as_deref(),
                    self.config.contacts_allowed,
                ))
                .width(Length::Fixed(260.0))
                .height(Length::Fill),
            );
        }

        let mut content = widget::row().spacing(1);
        content = content.push(
            widget::container(crate::ui::message_list::view(
                &self.messages,
                self.folder_list.current_folder(),
                self.open_message,
            ))
            .width(Length::Fill)
            .height(Length::Fill),
        );

        if self.config.layout == crate::core::models::PreviewMode::Preview {
            let open = self.open_message.and_then(|i| self.messages.get(i));
            content = content.push(
                widget::container(crate::ui::message_view::view(open))
                    .width(Length::Fill)
                    .height(Length::Fill),
            );
        }

        // A press in the message panes takes keyboard scope away from the
        // folder tree.
        panes = panes.push(
            widget::mouse_area(content).on_press(Message::FolderListFocus(false)),
        );

        let status_bar = widget::row()
            .push(
                widget::container(widget::text::caption(&self.status_message))
                    .padding([4, 8])
                    .width(Length::Fill),
            )
            .push(
                widget::button::text("Sign out")
                    .on_press(Message::Logout)
                    .class(cosmic::theme::Button::Text),
            )
            .align_y(cosmic::iced::Alignment::Center);

        widget::column()
            .push(panes)
            .push(status_bar)
            .height(Length::Fill)
            .into()
    }

    fn update(&mut self, message: Self::Message) -> Task<Self::Message> {
        match message {
            // Folder list input
            Message::FolderKey(_)
            | Message::FolderListFocus(_)
            | Message::ToggleCollapse(_)
            | Message::SelectFolder(_)
            | Message::FolderListScrolled { .. } => self.handle_folders(message),

            // Drag and drop
            Message::FolderDragEnter(_)
            | Message::FolderDragLeave
            | Message::HoverElapsed(_)
            | Message::DropMessages { .. } => self.handle_drag(message),

            // Breakpoints, input context, popups, session
            Message::ViewportResized { .. }
            | Message::ResizeSettled(_)
            | Message::ModifiersChanged(_)
            | Message::OpenPopup(_)
            | Message::ClosePopup
            | Message::Logout
            | Message::LogoutRedirect(_) => self.handle_shell(message),

            Message::OpenMessage(index) => {
                // Opening a message moves attention out of the folder tree.
                self.folder_list.set_container_focused(false);
                self.probe.set_folder_list_focused(false);
                if index < self.messages.len() {
                    self.open_message = Some(index);
                }
                Task::none()
            }

            Message::Noop => Task::none(),
        }
    }
}

impl AppModel {
    fn set_window_title(&self, title: String) -> Task<Message> {
        self.core.set_title(self.core.main_window_id(), title)
    }
}
