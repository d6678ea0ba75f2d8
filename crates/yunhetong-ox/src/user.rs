//! User management of the legacy form API.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    YunHeTong,
    error::{YunHeTongRequestError, require},
    internal::TOKEN_KEY,
    request::ApiRequest,
    response::LegacyResponse,
    types::{CertType, UserType},
};

/// Imports a user into the platform.
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct AddUser {
    /// The caller's own identifier of the user
    #[builder(into)]
    pub app_user_id: String,
    /// Mobile phone number
    #[builder(into)]
    pub cell_num: String,
    pub user_type: UserType,
    #[builder(into)]
    pub user_name: String,
    pub certify_type: CertType,
    #[builder(into)]
    pub certify_number: String,
    /// Let the platform generate a signature image for the user
    #[builder(default)]
    pub create_signature: bool,
}

impl ApiRequest for AddUser {
    const PATH: &'static str = "/userInfo/addUser";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCellNum {
    pub cell_num: String,
}

impl ApiRequest for ModifyCellNum {
    const PATH: &'static str = "/userInfo/modifyCellNum";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyUserName {
    pub user_name: String,
    /// Only sent when a new signature image is wanted
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub create_signature: bool,
}

impl ApiRequest for ModifyUserName {
    const PATH: &'static str = "/userInfo/modifyUserName";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetToken {
    pub app_user_id: String,
}

impl ApiRequest for GetToken {
    const PATH: &'static str = "/token/getToken";
    type Response = LegacyResponse<UserToken>;
}

/// Token acting on behalf of one user in legacy calls
#[derive(Clone, Deserialize)]
pub struct UserToken {
    pub token: String,
}

impl std::fmt::Debug for UserToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserToken").field("token", &"[REDACTED]").finish()
    }
}

impl YunHeTong {
    /// Registers a user with the platform.
    pub async fn add_user(&self, request: &AddUser) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("app_user_id", &request.app_user_id)?;
        require("cell_num", &request.cell_num)?;
        require("user_name", &request.user_name)?;
        require("certify_number", &request.certify_number)?;

        self.call_form(request, self.app_credentials()).await
    }

    /// Changes the mobile phone number of the user owning `token`.
    pub async fn modify_phone_number(
        &self,
        phone: &str,
        token: &str,
    ) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("phone", phone)?;
        require("token", token)?;

        let request = ModifyCellNum {
            cell_num: phone.to_string(),
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Changes the name of the user owning `token`.
    pub async fn modify_user_name(
        &self,
        name: &str,
        token: &str,
        auto_sign: bool,
    ) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("name", name)?;
        require("token", token)?;

        let request = ModifyUserName {
            user_name: name.to_string(),
            create_signature: auto_sign,
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Issues a token acting for `app_user_id` in the legacy API.
    pub async fn user_token(
        &self,
        app_user_id: &str,
    ) -> Result<LegacyResponse<UserToken>, YunHeTongRequestError> {
        require("app_user_id", app_user_id)?;

        let request = GetToken {
            app_user_id: app_user_id.to_string(),
        };
        self.call_form(&request, self.app_credentials()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{no_overlay, to_params};

    #[test]
    fn add_user_marshals_wire_names() {
        let request = AddUser::builder()
            .app_user_id("u-1")
            .cell_num("13800000000")
            .user_type(UserType::Personal)
            .user_name("张三")
            .certify_type(CertType::IdCard)
            .certify_number("110101199001011234")
            .create_signature(true)
            .build();

        let params = to_params(&request, [("appId", "app"), ("password", "pw")]).unwrap();

        assert_eq!(params["cellNum"], "13800000000");
        assert_eq!(params["createSignature"], "1");
        assert_eq!(params["userType"], "1");
        assert_eq!(params["certifyType"], "1");
        assert_eq!(params["certifyNumber"], "110101199001011234");
        assert_eq!(params["userName"], "张三");
        assert_eq!(params["appUserId"], "u-1");
        assert_eq!(params["appId"], "app");
        assert_eq!(params["password"], "pw");
    }

    #[test]
    fn modify_user_name_skips_signature_flag_when_unset() {
        let request = ModifyUserName {
            user_name: "李四".into(),
            create_signature: false,
        };
        let params = to_params(&request, no_overlay()).unwrap();
        assert!(!params.contains_key("createSignature"));

        let request = ModifyUserName {
            create_signature: true,
            ..request
        };
        let params = to_params(&request, no_overlay()).unwrap();
        assert_eq!(params["createSignature"], "1");
    }

    #[test]
    fn user_token_debug_is_redacted() {
        let token = UserToken {
            token: "tok-123".into(),
        };
        assert!(!format!("{token:?}").contains("tok-123"));
    }
}
