//! Role-gated routing. The original SPA resolved every navigation through one
//! protected-route component; the same decision table lives here as a pure
//! function, with one guard middleware per area applying it. The SPA's
//! "loading" state has no server counterpart — token resolution completes
//! before the table is consulted — so the table sees three auth states:
//! unauthenticated, admin, shop.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{config::AppState, models::auth::UserRole};

use super::auth::resolve_user;

/// Which area of the application a request is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    Login,
    Admin,
    Shop,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Proceed,
    Redirect(&'static str),
}

/// The routing decision table:
/// unauthenticated requests reach only the login area; everyone else is
/// pinned to their role's home, and unknown paths resolve to it too.
pub fn route_decision(role: Option<UserRole>, area: RouteArea) -> RouteOutcome {
    match role {
        None if area == RouteArea::Login => RouteOutcome::Proceed,
        None => RouteOutcome::Redirect("/login"),
        Some(role) => {
            let home_area = match role {
                UserRole::Admin => RouteArea::Admin,
                UserRole::Shop => RouteArea::Shop,
            };
            if area == home_area {
                RouteOutcome::Proceed
            } else {
                RouteOutcome::Redirect(role.home_path())
            }
        }
    }
}

/// Admin area: stock entry and the dashboard.
pub async fn admin_area_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Response {
    run_guard(app_state, bearer, RouteArea::Admin, request, next).await
}

/// Shop area: per-user sales recording.
pub async fn shop_area_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Response {
    run_guard(app_state, bearer, RouteArea::Shop, request, next).await
}

async fn run_guard(
    app_state: AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    area: RouteArea,
    mut request: Request,
    next: Next,
) -> Response {
    let user = resolve_user(&app_state, bearer.as_ref()).await;
    match route_decision(user.as_ref().map(|u| u.role), area) {
        RouteOutcome::Redirect(target) => Redirect::to(target).into_response(),
        RouteOutcome::Proceed => {
            if let Some(user) = user {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_requests_go_to_login() {
        assert_eq!(
            route_decision(None, RouteArea::Admin),
            RouteOutcome::Redirect("/login")
        );
        assert_eq!(
            route_decision(None, RouteArea::Shop),
            RouteOutcome::Redirect("/login")
        );
        assert_eq!(
            route_decision(None, RouteArea::Unknown),
            RouteOutcome::Redirect("/login")
        );
        assert_eq!(route_decision(None, RouteArea::Login), RouteOutcome::Proceed);
    }

    #[test]
    fn shop_user_is_pinned_to_shop_home() {
        assert_eq!(
            route_decision(Some(UserRole::Shop), RouteArea::Admin),
            RouteOutcome::Redirect("/shop")
        );
        assert_eq!(
            route_decision(Some(UserRole::Shop), RouteArea::Login),
            RouteOutcome::Redirect("/shop")
        );
        assert_eq!(
            route_decision(Some(UserRole::Shop), RouteArea::Shop),
            RouteOutcome::Proceed
        );
    }

    #[test]
    fn admin_is_pinned_to_admin_home() {
        assert_eq!(
            route_decision(Some(UserRole::Admin), RouteArea::Shop),
            RouteOutcome::Redirect("/admin")
        );
        assert_eq!(
            route_decision(Some(UserRole::Admin), RouteArea::Unknown),
            RouteOutcome::Redirect("/admin")
        );
        assert_eq!(
            route_decision(Some(UserRole::Admin), RouteArea::Admin),
            RouteOutcome::Proceed
        );
    }
}
