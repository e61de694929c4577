use common::LoginResponse;
use serde::{Deserialize, Serialize};
use web_sys::window;
use yew::prelude::*;

const STORAGE_KEY: &str = "tutordesk_session";

/// Who is signed in. Created on login and dropped on logout; nothing else
/// in the app holds identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: i32,
    pub role: String,
    pub fname: String,
    pub lname: String,
    /// Set for tutors once their tutor record has been resolved.
    pub tutor_id: Option<i32>,
}

impl Session {
    pub const TUTOR: &'static str = "T";
    pub const PARENT: &'static str = "P";

    pub fn new(identity: LoginResponse, tutor_id: Option<i32>) -> Self {
        Self {
            account_id: identity.account_id,
            role: identity.role,
            fname: identity.fname,
            lname: identity.lname,
            tutor_id,
        }
    }

    pub fn is_tutor(&self) -> bool {
        self.role == Self::TUTOR
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.fname, self.lname).trim().to_string()
    }

    fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

fn load_session() -> Option<Session> {
    let storage = window()?.local_storage().ok()??;
    let raw = storage.get_item(STORAGE_KEY).ok()??;
    let session = Session::from_json(&raw);
    if session.is_none() {
        log::warn!("Discarding unreadable stored session");
        let _ = storage.remove_item(STORAGE_KEY);
    }
    session
}

fn store_session(session: Option<&Session>) {
    let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) else {
        log::warn!("Local storage unavailable; session will not survive a reload");
        return;
    };
    let result = match session.map(serde_json::to_string) {
        Some(Ok(raw)) => storage.set_item(STORAGE_KEY, &raw),
        Some(Err(e)) => {
            log::error!("Failed to serialize session: {}", e);
            return;
        }
        None => storage.remove_item(STORAGE_KEY),
    };
    if result.is_err() {
        log::error!("Failed to update stored session");
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Option<Session>,
    pub login: Callback<Session>,
    pub logout: Callback<()>,
}

impl SessionContext {
    pub fn tutor_id(&self) -> Option<i32> {
        self.session.as_ref().and_then(|s| s.tutor_id)
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_state(load_session);

    let login = {
        let session = session.clone();
        Callback::from(move |new_session: Session| {
            log::info!("Account {} signed in", new_session.account_id);
            store_session(Some(&new_session));
            session.set(Some(new_session));
        })
    };

    let logout = {
        let session = session.clone();
        Callback::from(move |_| {
            log::info!("Signed out");
            store_session(None);
            session.set(None);
        })
    };

    let context = SessionContext {
        session: (*session).clone(),
        login,
        logout,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
