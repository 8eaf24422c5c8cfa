//! The fixed Pre-Approval Academy curriculum: ten modules and the ten-question
//! certification exam.

use crate::model::{CaseStudy, LessonId, LessonRecord, QuestionId, QuizQuestion};

/// XP granted per module on first completion.
pub const LESSON_XP: u32 = 50;

/// XP granted for each correct exam answer given before the exam finishes.
pub const CORRECT_ANSWER_XP: u32 = 10;

/// One-time XP bonus for finishing the exam with a perfect score.
pub const PASS_BONUS_XP: u32 = 200;

/// Read-only view over the static lesson and question tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curriculum {
    lessons: &'static [LessonRecord],
    questions: &'static [QuizQuestion],
}

impl Curriculum {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            lessons: &LESSONS,
            questions: &QUESTIONS,
        }
    }

    #[must_use]
    pub fn lessons(&self) -> &'static [LessonRecord] {
        self.lessons
    }

    #[must_use]
    pub fn questions(&self) -> &'static [QuizQuestion] {
        self.questions
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&'static LessonRecord> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    #[must_use]
    pub fn lesson_at(&self, index: usize) -> Option<&'static LessonRecord> {
        self.lessons.get(index)
    }

    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&'static QuizQuestion> {
        self.questions.get(index)
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Self::standard()
    }
}

static LESSONS: [LessonRecord; 10] = [
    LessonRecord {
        id: LessonId::new(1),
        title: "The Mindset Shift",
        subtitle: "The Detroit Reality",
        objective: "Understand that homeownership requires a change in habits, not just a change in address.",
        xp: LESSON_XP,
        points: &[
            "Detroit home values rose 72% from 2020-2024. The window is closing.",
            "Mindset matters more than money in the early stages.",
            "You must decide: Are you building wealth, or being pushed out?",
        ],
        case_study: CaseStudy {
            character: "Berry (Auto Worker)",
            scenario: "Berry makes $85k/year at the plant. He pays $1,100 in rent but spends every other dollar on clothes and dinners. He wants a $2,200 mortgage.",
            lesson: "Even though Berry earns enough, he hasn't practiced 'Payment Shock.' If he can't save the difference between his rent ($1,100) and his future mortgage ($2,200) for 6 months, he isn't ready.",
        },
        gold_tip: "If your habits don't change, your future won't either.",
    },
    LessonRecord {
        id: LessonId::new(2),
        title: "Financial Readiness",
        subtitle: "Budgeting & Banking",
        objective: "Master the budget to prove mortgage affordability.",
        xp: LESSON_XP,
        points: &[
            "No 'mattress money'. Cash cannot be tracked or used.",
            "Funds must be 'seasoned' (in a bank account for 60+ days).",
            "Underwriters look at NET income (what you keep), not just GROSS.",
        ],
        case_study: CaseStudy {
            character: "Diana (Nurse)",
            scenario: "Diana doesn't trust banks. She keeps $6,000 cash in a safe. She deposits it all one week before applying for a loan.",
            lesson: "The bank cannot use this money. To an underwriter, a large sudden cash deposit looks like a loan from a friend. Money must sit in a bank account for 60 days ('Seasoning') to be counted.",
        },
        gold_tip: "No Mattress Money. No Cash App. No Chime.",
    },
    LessonRecord {
        id: LessonId::new(3),
        title: "Credit That Closes",
        subtitle: "Score & Utilization",
        objective: "Learn how credit acts as a measure of 'lender trust'.",
        xp: LESSON_XP,
        points: &[
            "Mortgage denial rates hit Black borrowers hardest (27% denial rate).",
            "High credit utilization (maxed cards) drastically lowers scores.",
            "Strategy: Pay balances down to 30% (or ideally 10%).",
        ],
        case_study: CaseStudy {
            character: "Smokey (Teacher)",
            scenario: "Smokey has a $1,000 limit credit card. He owes $950. He pays on time every month, but his score is stuck at 620.",
            lesson: "Payment history isn't the only factor. His 'Utilization Rate' is 95%. Lenders see this as 'maxed out' and risky. If he pays the balance down to $300 (30%), his score could jump 40+ points.",
        },
        gold_tip: "If your credit wildin', the deal dies.",
    },
    LessonRecord {
        id: LessonId::new(4),
        title: "Income Stability",
        subtitle: "Employment History",
        objective: "Demonstrate stability. Underwriters hate surprises.",
        xp: LESSON_XP,
        points: &[
            "Job hopping scares banks. Stick to your job.",
            "W-2 income is the 'Gold Standard'.",
            "Self-employed? You MUST show a YTD Profit & Loss statement.",
        ],
        case_study: CaseStudy {
            character: "Marvin (Contractor)",
            scenario: "Marvin made $120k last year! But to avoid taxes, he wrote off his truck, gas, and tools. His tax return shows a taxable profit of only $18,000.",
            lesson: "You can't have it both ways. If you tell the IRS you make $18k to save on taxes, the bank assumes you make $18k and will deny your loan. Write-offs lower your borrowing power.",
        },
        gold_tip: "A raise won't fix unstable deposits.",
    },
    LessonRecord {
        id: LessonId::new(5),
        title: "The Document Vault",
        subtitle: "Paperwork Precision",
        objective: "Prepare a pristine paper trail.",
        xp: LESSON_XP,
        points: &[
            "The 'All Pages' Rule: Provide all pages, even if blank.",
            "No screenshots allowed. Only official PDF downloads.",
            "Missing pages are the #1 cause of delays.",
        ],
        case_study: CaseStudy {
            character: "Aretha (Admin)",
            scenario: "Aretha downloads her bank statement. It says 'Page 1 of 6'. Page 6 is blank, so she deletes it to be helpful and sends pages 1-5.",
            lesson: "The underwriter pauses her file. Why? Because Page 6 *might* show a hidden loan or debt. You must submit EVERY page, even the blank ones, or the process stops.",
        },
        gold_tip: "If we can't find it, we can't fund it.",
    },
    LessonRecord {
        id: LessonId::new(6),
        title: "Loan Mechanics",
        subtitle: "FHA, Conventional & DPA",
        objective: "Know your loan types and credit benchmarks.",
        xp: LESSON_XP,
        points: &[
            "FHA Loans often require a minimum 580 credit score.",
            "Down Payment Assistance (DPA) programs often require a 640 score.",
            "Do NOT buy furniture or cars before closing.",
        ],
        case_study: CaseStudy {
            character: "Stevie (IT Pro)",
            scenario: "Stevie has a 600 credit score. He is excited because FHA loans only require a 580. He also wants the $10,000 MSHDA grant for his down payment.",
            lesson: "Stevie has a problem. While he qualifies for the *loan* (580), he does NOT qualify for the *grant* (640). He needs to raise his score 40 points to get the free money.",
        },
        gold_tip: "Pre-approval ain't pre-paid.",
    },
    LessonRecord {
        id: LessonId::new(7),
        title: "Smart Search Strategy",
        subtitle: "Shopping for Value",
        objective: "Shop for the financial reality, not just the aesthetic.",
        xp: LESSON_XP,
        points: &[
            "Shop UNDER your pre-approval limit to leave room for bidding.",
            "Work with a DPA-friendly real estate agent.",
            "Don't fall in love with the house; fall in love with the payment.",
        ],
        case_study: CaseStudy {
            character: "Gladys (Bus Driver)",
            scenario: "Gladys is pre-approved for $175,000. She finds a dream home listed for $175,000 in a neighborhood with high taxes.",
            lesson: "If Gladys offers the full $175,000, the high taxes will push her monthly payment ABOVE what the bank approved. She should shop at $160,000 to leave 'wiggle room' for taxes and insurance.",
        },
        gold_tip: "Your eyes can be bigger than your budget.",
    },
    LessonRecord {
        id: LessonId::new(8),
        title: "Inspections vs. Appraisals",
        subtitle: "Condition vs. Value",
        objective: "Understand the difference between protection and value.",
        xp: LESSON_XP,
        points: &[
            "Inspection = Condition (Protects YOU).",
            "Appraisal = Value (Protects the BANK).",
            "Never waive the inspection on an older Detroit home.",
        ],
        case_study: CaseStudy {
            character: "David (Mechanic)",
            scenario: "The seller tells David, 'The bank appraisal is done and the value is high! You don't need an inspection.'",
            lesson: "Wrong. The Appraiser checks VALUE. They don't check if the sewer line is collapsed or the furnace is about to die. David needs an INSPECTOR to protect his wallet from repairs.",
        },
        gold_tip: "Skipping inspection is skipping protection.",
    },
    LessonRecord {
        id: LessonId::new(9),
        title: "Closing Day",
        subtitle: "The Finish Line",
        objective: "Finalizing the deal without fumbling.",
        xp: LESSON_XP,
        points: &[
            "The Closing Disclosure (CD) is your final receipt.",
            "Bring your ID and Cashier's Check.",
            "Keys > Contract. You aren't done until keys are in hand.",
        ],
        case_study: CaseStudy {
            character: "Martha (Chef)",
            scenario: "Martha is 3 days from closing. Her daughter needs a car for college. Martha co-signs the loan because 'I'm not making the payments.'",
            lesson: "The lender does a final credit check 24 hours before closing. They see the new $25,000 car debt. This ruins Martha's Debt-to-Income ratio, and her mortgage is DENIED at the finish line.",
        },
        gold_tip: "The deal isn't closed until the ink is dry.",
    },
    LessonRecord {
        id: LessonId::new(10),
        title: "Legacy Building",
        subtitle: "Sustaining Ownership",
        objective: "Turning a house into generational wealth.",
        xp: LESSON_XP,
        points: &[
            "Establish a 'Maintenance Fund' immediately.",
            "Don't treat your home like an ATM (refinancing constantly).",
            "Equity is the fuel; Ownership is the engine.",
        ],
        case_study: CaseStudy {
            character: "Otis (Retired)",
            scenario: "Two weeks after moving in, a pipe bursts in Otis's basement. He calls the bank to ask for help.",
            lesson: "The bank won't help. The seller won't help. Otis owns it now. This is why a Maintenance Fund is mandatory: homeownership means YOU are the landlord.",
        },
        gold_tip: "Ownership is YOUR Legacy.",
    },
];

static QUESTIONS: [QuizQuestion; 10] = [
    QuizQuestion {
        id: QuestionId::new(1),
        story: "Berry works at the Jefferson North Assembly Plant making $85k/year. He pays $1,100 in rent but spends the rest of his paycheck every month. He wants to buy a house with a $2,200/month mortgage payment. He has the down payment saved from a bonus.",
        question: "Why is Berry considered 'High Risk' despite having the income and down payment?",
        options: [
            "He makes too much annual income to qualify for any first-time homebuyer programs or DPA grants.",
            "He hasn't practiced 'Payment Shock' by saving the $1,100 difference between his rent and future mortgage.",
            "Factory workers are considered seasonal employees, so his income cannot be used for a 30-year mortgage.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(2),
        story: "Diana is a nurse at Henry Ford Hospital. She saved $6,000 in cash in her safe at home over the last year. She deposits it into her credit union account 2 weeks before applying for her mortgage.",
        question: "How will the underwriter view this $6,000 deposit?",
        options: [
            "They will accept the cash deposit because she works at a reputable hospital with steady income.",
            "They will reject the funds because cash cannot be sourced. Money must be 'seasoned' in a bank for 60 days.",
            "They will require a notarized letter from her manager and a signed affidavit explaining the cash savings.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(3),
        story: "Smokey is a teacher. He has a 700 credit score. He has one credit card with a $1,000 limit. He currently has a balance of $900 on it, but he pays the minimum payment on time every single month.",
        question: "Smokey thinks his credit is fine because he pays on time. What is actually hurting his score?",
        options: [
            "Teachers often have lower credit score requirements, so his current score is acceptable for rates.",
            "His Utilization Rate is 90%. He needs to pay it down to 30% or 10% to maximize his score.",
            "He needs to open three new credit cards to increase his total available credit limit immediately.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(4),
        story: "Marvin is a self-employed contractor. His business Gross Revenue was $120,000 last year. However, he wrote off almost everything (gas, tools, truck) on his taxes, so his 'Net Income' on his tax return shows only $18,000.",
        question: "When Marvin applies for a loan, which income figure will the bank use?",
        options: [
            "The full $120,000 Gross Revenue, as this reflects the total cash flow of his business.",
            "An average of $69,000, combining his gross revenue and his expenses for a fair estimate.",
            "Only the $18,000 Net Income, because lenders calculate income based on what is taxable after write-offs.",
        ],
        correct_index: 2,
    },
    QuizQuestion {
        id: QuestionId::new(5),
        story: "Aretha works in administration. She downloads her bank statement PDF. It says 'Page 1 of 6' at the top. Page 6 is completely blank, so she deletes it and submits Pages 1-5 to the loan officer.",
        question: "What happens next?",
        options: [
            "The loan proceeds smoothly since the page was blank and contained no financial transactions.",
            "The underwriter pauses the file. The 'All Pages' rule requires every page, even if it is completely blank.",
            "The bank assumes she is hiding debt and will automatically deny the loan for mortgage fraud.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(6),
        story: "Stevie works in IT. He has a credit score of 605. He wants to use the MSHDA Down Payment Assistance (DPA) program to help with his closing costs.",
        question: "Does Stevie qualify for most DPA programs based on his score?",
        options: [
            "Yes, because FHA loans and DPA programs always have the exact same credit score requirements.",
            "No. While FHA allows 580, most Down Payment Assistance (DPA) programs require a minimum of 640.",
            "Yes, IT professionals usually receive industry-specific waivers for down payment assistance scores.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(7),
        story: "Gladys is a bus driver. She was pre-approved for $175,000. She finds a house listed for $175,000 in a neighborhood with high property taxes.",
        question: "Is it safe for Gladys to offer the full $175,000?",
        options: [
            "Yes, if the bank pre-approved her for that amount, it guarantees she can comfortably afford the payment.",
            "No. High property taxes could push her payment over the limit. She should shop lower to be safe.",
            "Yes, because first-time homebuyers in Detroit are exempt from paying property taxes for the first year.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(8),
        story: "David is a mechanic. The seller of a home tells him, 'We already had an appraisal done, and the value is high! You don't need to waste money on an inspection.'",
        question: "What is the critical error in the seller's logic?",
        options: [
            "Appraisals determine VALUE for the bank. Inspections determine CONDITION (roof, furnace) for David.",
            "Appraisals cover everything. An inspector is only needed if the appraiser finds a specific problem.",
            "Mechanics can fix anything, so David can waive the inspection to make his offer more attractive.",
        ],
        correct_index: 0,
    },
    QuizQuestion {
        id: QuestionId::new(9),
        story: "Martha is a chef. Three days before her closing, her daughter asks her to co-sign for a car loan. Martha agrees because 'I'm not the one making the payments.'",
        question: "How does this affect Martha's mortgage?",
        options: [
            "It has no effect because she is only a co-signer and will not be the primary driver of the car.",
            "It creates a new hard inquiry and increases her Debt-to-Income ratio, which could disqualify her.",
            "It helps her application by adding another active trade line to her credit report before closing.",
        ],
        correct_index: 1,
    },
    QuizQuestion {
        id: QuestionId::new(10),
        story: "Otis is retired and just bought his bungalow. A pipe bursts in the basement two weeks after moving in. He calls his loan officer asking for money to fix it.",
        question: "Who is responsible for this repair?",
        options: [
            "The Bank is responsible since the damage occurred within the first 30 days of the mortgage.",
            "The Seller is responsible because they likely knew about the pipe issue before selling the home.",
            "Otis is responsible. This is why having a 'Maintenance Fund' is mandatory for sustainable ownership.",
        ],
        correct_index: 2,
    },
];
