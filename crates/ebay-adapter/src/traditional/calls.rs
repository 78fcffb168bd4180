//! Call registries
//!
//! The set of call names per API is fixed at compile time. Invoking a name
//! outside the registry fails before anything is sent.

use crate::error::{EbayError, Result};

/// Registered call names of one API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallRegistry {
    api: &'static str,
    calls: &'static [&'static str],
}

impl CallRegistry {
    pub const fn new(api: &'static str, calls: &'static [&'static str]) -> Self {
        Self { api, calls }
    }

    pub fn api(&self) -> &'static str {
        self.api
    }

    pub fn calls(&self) -> &'static [&'static str] {
        self.calls
    }

    pub fn contains(&self, call_name: &str) -> bool {
        self.calls.iter().any(|c| *c == call_name)
    }

    /// Registered name for `call_name`, or `UnsupportedCall`
    pub fn resolve(&self, call_name: &str) -> Result<&'static str> {
        self.calls
            .iter()
            .copied()
            .find(|c| *c == call_name)
            .ok_or_else(|| EbayError::UnsupportedCall { api: self.api, call: call_name.to_string() })
    }
}

pub const TRADING_CALLS: &[&str] = &[
    "AddDispute",
    "AddDisputeResponse",
    "AddFixedPriceItem",
    "AddItem",
    "AddItemFromSellingManagerTemplate",
    "AddItems",
    "AddMemberMessageAAQToPartner",
    "AddMemberMessageRTQ",
    "AddMemberMessagesAAQToBidder",
    "AddOrder",
    "AddSecondChanceItem",
    "AddSellingManagerInventoryFolder",
    "AddSellingManagerProduct",
    "AddSellingManagerTemplate",
    "AddToItemDescription",
    "AddToWatchList",
    "AddTransactionConfirmationItem",
    "CompleteSale",
    "ConfirmIdentity",
    "DeleteMyMessages",
    "DeleteSellingManagerInventoryFolder",
    "DeleteSellingManagerItemAutomationRule",
    "DeleteSellingManagerProduct",
    "DeleteSellingManagerTemplate",
    "DeleteSellingManagerTemplateAutomationRule",
    "DisableUnpaidItemAssistance",
    "EndFixedPriceItem",
    "EndItem",
    "EndItems",
    "ExtendSiteHostedPictures",
    "FetchToken",
    "GetAccount",
    "GetAdFormatLeads",
    "GetAllBidders",
    "GetApiAccessRules",
    "GetBestOffers",
    "GetBidderList",
    "GetCategories",
    "GetCategoryFeatures",
    "GetCategoryMappings",
    "GetCategorySpecifics",
    "GetChallengeToken",
    "GetCharities",
    "GetClientAlertsAuthToken",
    "GetContextualKeywords",
    "GetDescriptionTemplates",
    "GetDispute",
    "GetFeedback",
    "GetItem",
    "GetItemShipping",
    "GetItemTransactions",
    "GetItemsAwaitingFeedback",
    "GetMemberMessages",
    "GetMessagePreferences",
    "GetMyMessages",
    "GetMyeBayBuying",
    "GetMyeBayReminders",
    "GetMyeBaySelling",
    "GetNotificationPreferences",
    "GetNotificationsUsage",
    "GetOrderTransactions",
    "GetOrders",
    "GetPromotionalSaleDetails",
    "GetSellerDashboard",
    "GetSellerEvents",
    "GetSellerList",
    "GetSellerTransactions",
    "GetSellingManagerAlerts",
    "GetSellingManagerEmailLog",
    "GetSellingManagerInventory",
    "GetSellingManagerInventoryFolder",
    "GetSellingManagerItemAutomationRule",
    "GetSellingManagerSaleRecord",
    "GetSellingManagerSoldListings",
    "GetSellingManagerTemplateAutomationRule",
    "GetSellingManagerTemplates",
    "GetSessionID",
    "GetShippingDiscountProfiles",
    "GetStore",
    "GetStoreCategoryUpdateStatus",
    "GetStoreCustomPage",
    "GetStoreOptions",
    "GetStorePreferences",
    "GetSuggestedCategories",
    "GetTaxTable",
    "GetTokenStatus",
    "GetUser",
    "GetUserContactDetails",
    "GetUserDisputes",
    "GetUserPreferences",
    "GetVeROReasonCodeDetails",
    "GetVeROReportStatus",
    "GeteBayDetails",
    "GeteBayOfficialTime",
    "LeaveFeedback",
    "MoveSellingManagerInventoryFolder",
    "PlaceOffer",
    "RelistFixedPriceItem",
    "RelistItem",
    "RemoveFromWatchList",
    "RespondToBestOffer",
    "RespondToFeedback",
    "ReviseCheckoutStatus",
    "ReviseFixedPriceItem",
    "ReviseInventoryStatus",
    "ReviseItem",
    "ReviseMyMessages",
    "ReviseMyMessagesFolders",
    "ReviseSellingManagerInventoryFolder",
    "ReviseSellingManagerProduct",
    "ReviseSellingManagerSaleRecord",
    "ReviseSellingManagerTemplate",
    "RevokeToken",
    "SaveItemToSellingManagerTemplate",
    "SellerReverseDispute",
    "SendInvoice",
    "SetMessagePreferences",
    "SetNotificationPreferences",
    "SetPromotionalSale",
    "SetPromotionalSaleListings",
    "SetSellingManagerFeedbackOptions",
    "SetSellingManagerItemAutomationRule",
    "SetSellingManagerTemplateAutomationRule",
    "SetShippingDiscountProfiles",
    "SetStore",
    "SetStoreCategories",
    "SetStoreCustomPage",
    "SetStorePreferences",
    "SetTaxTable",
    "SetUserNotes",
    "SetUserPreferences",
    "UploadSiteHostedPictures",
    "ValidateChallengeInput",
    "ValidateTestUserRegistration",
    "VeROReportItems",
    "VerifyAddFixedPriceItem",
    "VerifyAddItem",
    "VerifyAddSecondChanceItem",
    "VerifyRelistItem",
];

pub const SHOPPING_CALLS: &[&str] = &[
    "FindProducts",
    "GetCategoryInfo",
    "GetItemStatus",
    "GetMultipleItems",
    "GetShippingCosts",
    "GetSingleItem",
    "GetUserProfile",
    "GeteBayTime",
];

pub const FINDING_CALLS: &[&str] = &[
    "findCompletedItems",
    "findItemsAdvanced",
    "findItemsByCategory",
    "findItemsByKeywords",
    "findItemsByProduct",
    "findItemsIneBayStores",
    "getHistograms",
    "getSearchKeywordsRecommendation",
    "getVersion",
];

pub const CLIENT_ALERTS_CALLS: &[&str] = &["GetPublicAlerts", "GetUserAlerts", "Login", "Logout"];
